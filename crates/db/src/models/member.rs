//! Member entity model, join row and DTOs.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub name: String,
    pub affiliation: Option<String>,
    pub role: Option<String>,
    pub team_id: Option<DbId>,
    pub social_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: Timestamp,
}

/// `members` row joined with the owning team's name.
///
/// Kept separate from [`Member`] so that the nullable join column never leaks
/// into the base entity; [`MemberWithTeam::into_listing`] flattens it.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithTeam {
    #[sqlx(flatten)]
    pub member: Member,
    pub team_name: Option<String>,
}

/// Flattened member as returned by admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct MemberListing {
    #[serde(flatten)]
    pub member: Member,
    pub team_name: Option<String>,
}

impl MemberWithTeam {
    pub fn into_listing(self) -> MemberListing {
        MemberListing {
            member: self.member,
            team_name: self.team_name,
        }
    }
}

/// Normalised member fields. Blank optionals are already `None`.
#[derive(Debug, Clone, Default)]
pub struct MemberFields {
    pub name: String,
    pub affiliation: Option<String>,
    pub role: Option<String>,
    pub team_id: Option<DbId>,
    pub social_url: Option<String>,
}
