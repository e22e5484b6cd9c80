//! Repository for the `users` table.

use sqlx::PgPool;

pub struct UserRepo;

impl UserRepo {
    /// Insert a user row if it does not already exist.
    ///
    /// Returns `true` when a row was actually inserted. Identity
    /// providers redeliver webhook events, so a duplicate id is a
    /// benign no-op rather than an error.
    pub async fn create_if_absent(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO users (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user row exists.
    pub async fn exists(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
