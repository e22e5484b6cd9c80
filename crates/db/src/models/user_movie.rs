use serde::Serialize;
use sqlx::FromRow;

use boxd_core::types::{MovieId, UserId, WatchDate};

/// A row from the `user_movie` table: one user's rating and/or
/// watched-on date for one movie.
///
/// At most one row exists per (user, movie) pair; writes replace the
/// row wholesale rather than merging fields.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserMovie {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: Option<i32>,
    pub watched_at: Option<WatchDate>,
}
