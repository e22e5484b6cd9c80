//! Repository for the `user_movie` table (per-user ratings and watch dates).

use sqlx::PgPool;

use boxd_core::types::{MovieId, WatchDate};

use crate::models::user_movie::UserMovie;

/// Column list for user_movie queries.
const COLUMNS: &str = "user_id, movie_id, rating, watched_at";

pub struct UserMovieRepo;

impl UserMovieRepo {
    /// Arithmetic mean of the ratings recorded for a movie.
    ///
    /// Rows whose rating is NULL (watch date only) are excluded from
    /// both the sum and the count. Returns `None` when no rated rows
    /// exist, never zero.
    pub async fn average_rating(
        pool: &PgPool,
        movie_id: MovieId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(rating)::double precision FROM user_movie WHERE movie_id = $1",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await
    }

    /// Fetch one user's activity row for one movie, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        movie_id: MovieId,
    ) -> Result<Option<UserMovie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_movie WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, UserMovie>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// List every activity row owned by a user.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<UserMovie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_movie WHERE user_id = $1 ORDER BY movie_id");
        sqlx::query_as::<_, UserMovie>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically replace a user's activity row for a movie.
    ///
    /// A single upsert, so the row never transiently disappears and
    /// concurrent writers cannot lose each other's insert. Unsupplied
    /// fields are stored as NULL, not carried over from the prior row.
    pub async fn replace<'e, E>(
        executor: E,
        user_id: &str,
        movie_id: MovieId,
        rating: Option<i32>,
        watched_at: Option<WatchDate>,
    ) -> Result<UserMovie, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_movie (user_id, movie_id, rating, watched_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, movie_id)
             DO UPDATE SET rating = EXCLUDED.rating, watched_at = EXCLUDED.watched_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserMovie>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(rating)
            .bind(watched_at)
            .fetch_one(executor)
            .await
    }
}
