//! Shared type aliases used across the db and api crates.

/// Movie identity is an opaque integer assigned by the external catalog
/// provider; there is no local movies table.
pub type MovieId = i64;

/// Comment primary keys are PostgreSQL BIGSERIAL.
pub type CommentId = i64;

/// User identity is an opaque string assigned by the identity provider.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Watched-on dates carry no time-of-day component.
pub type WatchDate = chrono::NaiveDate;
