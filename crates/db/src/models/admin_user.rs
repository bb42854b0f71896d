//! Back-office account rows.

use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `admin_users` table. Never serialized: it carries the hash.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}
