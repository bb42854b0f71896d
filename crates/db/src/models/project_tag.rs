//! Project tag rows. Identity is the `(project_id, tag)` pair.

use serde::Serialize;
use showcase_core::types::DbId;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ProjectTag {
    pub project_id: DbId,
    pub tag: String,
}
