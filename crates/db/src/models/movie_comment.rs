use serde::Serialize;
use sqlx::FromRow;

use boxd_core::types::{CommentId, MovieId, Timestamp, UserId};

/// A row from the `movie_comments` table.
///
/// Comments are append-only: multiple rows per (user, movie) pair are
/// allowed, unlike ratings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MovieComment {
    pub id: CommentId,
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub comment: String,
    pub commented_at: Timestamp,
}
