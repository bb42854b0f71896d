//! Attached project file rows.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `project_files` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub project_id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub created_at: Timestamp,
}

/// Input for linking an uploaded blob to a project.
#[derive(Debug, Clone)]
pub struct CreateProjectFile {
    pub project_id: DbId,
    pub file_name: String,
    pub file_url: String,
}
