//! Request handlers.
//!
//! Each submodule provides async handler functions for one endpoint
//! family. Handlers delegate to the repositories in `boxd_db` and map
//! errors via [`crate::error::AppError`].

pub mod catalog;
pub mod movie_meta;
pub mod user_activity;
pub mod webhooks;
