use serde::Serialize;
use sqlx::FromRow;

use boxd_core::types::UserId;

/// A row from the `users` table.
///
/// Users are provisioned exclusively by the identity-provider webhook;
/// this system never updates or deletes them.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
}
