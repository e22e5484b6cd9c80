//! Repository for the `movie_comments` table.

use sqlx::PgPool;

use boxd_core::types::MovieId;

use crate::models::movie_comment::MovieComment;

/// Column list for movie_comments queries.
const COLUMNS: &str = "id, user_id, movie_id, comment, commented_at";

pub struct MovieCommentRepo;

impl MovieCommentRepo {
    /// Append a comment, returning the created row.
    pub async fn insert<'e, E>(
        executor: E,
        user_id: &str,
        movie_id: MovieId,
        comment: &str,
    ) -> Result<MovieComment, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO movie_comments (user_id, movie_id, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieComment>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(comment)
            .fetch_one(executor)
            .await
    }

    /// All comments on a movie, from every user, in insertion order.
    pub async fn list_by_movie(
        pool: &PgPool,
        movie_id: MovieId,
    ) -> Result<Vec<MovieComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_comments WHERE movie_id = $1 ORDER BY id");
        sqlx::query_as::<_, MovieComment>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// All comments written by a user, across every movie.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<MovieComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_comments WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, MovieComment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
