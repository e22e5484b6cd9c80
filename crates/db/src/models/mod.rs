//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row. Wire names are camelCase to match the
//! JSON the frontend consumes.

pub mod movie_comment;
pub mod user;
pub mod user_movie;
