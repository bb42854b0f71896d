//! Gallery image rows.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `project_images` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub image_url: String,
    pub display_order: Option<i32>,
    pub created_at: Timestamp,
}
