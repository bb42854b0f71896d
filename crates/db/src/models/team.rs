//! Team entity model and DTOs.

use serde::{Deserialize, Serialize};
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Slim projection used to fill team selection lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamOption {
    pub id: DbId,
    pub name: String,
}

/// Request body for creating or updating a team.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamInput {
    pub name: String,
    pub description: Option<String>,
}
