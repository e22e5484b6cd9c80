//! Domain types, validation, and webhook signature verification for boxd.
//!
//! This crate is I/O-free: everything here is a pure function of its
//! inputs so the API layer can be tested without a database or network.

pub mod activity;
pub mod error;
pub mod types;
pub mod webhook;
