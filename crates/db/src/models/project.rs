//! Project entity model, join row and DTOs.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub team_id: Option<DbId>,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
}

/// `projects` row joined with the owning team's name.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectWithTeam {
    #[sqlx(flatten)]
    pub project: Project,
    pub team_name: Option<String>,
}

/// Flattened project as returned by listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListing {
    #[serde(flatten)]
    pub project: Project,
    pub team_name: Option<String>,
}

impl ProjectWithTeam {
    pub fn into_listing(self) -> ProjectListing {
        ProjectListing {
            project: self.project,
            team_name: self.team_name,
        }
    }
}

/// Scalar project fields written by the upsert workflow.
///
/// `title` is already validated non-blank and blank optionals are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFields {
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub team_id: Option<DbId>,
}
