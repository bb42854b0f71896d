//! Public gallery: project cards and detail pages. No authentication.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::roster::{is_team_leader, leaders_first};
use showcase_core::types::{DbId, Timestamp};
use showcase_db::models::member::Member;
use showcase_db::repositories::{
    MemberRepo, ProjectFileRepo, ProjectImageRepo, ProjectRepo, ProjectTagRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub q: Option<String>,
}

/// One card of the gallery grid.
#[derive(Debug, Serialize)]
pub struct ProjectCard {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub thumbnail_url: Option<String>,
    pub team_name: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct TeamMemberCard {
    pub id: DbId,
    pub name: String,
    pub role: Option<String>,
    pub affiliation: Option<String>,
    pub social_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub is_leader: bool,
}

impl From<Member> for TeamMemberCard {
    fn from(m: Member) -> Self {
        let is_leader = is_team_leader(&m.name, m.role.as_deref());
        Self {
            id: m.id,
            name: m.name,
            role: m.role,
            affiliation: m.affiliation,
            social_url: m.social_url,
            profile_image_url: m.profile_image_url,
            is_leader,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttachedFile {
    pub name: String,
    pub url: String,
}

/// Project detail page.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub team_id: Option<DbId>,
    pub team_name: Option<String>,
    pub tags: Vec<String>,
    /// Gallery image URLs in display order.
    pub images: Vec<String>,
    /// Team roster, leaders first.
    pub members: Vec<TeamMemberCard>,
    pub files: Vec<AttachedFile>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects?q=
///
/// Newest first. `q` filters by title, case-insensitively.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> AppResult<impl IntoResponse> {
    let term = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let rows = ProjectRepo::list_with_team(&state.pool, term).await?;

    let ids: Vec<DbId> = rows.iter().map(|r| r.project.id).collect();
    let mut tags_by_project: HashMap<DbId, Vec<String>> = HashMap::new();
    for row in ProjectTagRepo::list_for_projects(&state.pool, &ids).await? {
        tags_by_project.entry(row.project_id).or_default().push(row.tag);
    }

    let fallback = state.config.default_thumbnail_url.as_deref();
    let cards: Vec<ProjectCard> = rows
        .into_iter()
        .map(|row| {
            let p = row.project;
            ProjectCard {
                tags: tags_by_project.remove(&p.id).unwrap_or_default(),
                thumbnail_url: p.thumbnail_url.or_else(|| fallback.map(str::to_string)),
                id: p.id,
                title: p.title,
                summary: p.summary,
                team_name: row.team_name,
                created_at: p.created_at,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/projects/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = ProjectRepo::find_with_team(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let project = row.project;

    let tags = ProjectTagRepo::list_for_project(&state.pool, id).await?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id)
        .await?
        .into_iter()
        .map(|img| img.image_url)
        .collect();
    let files = ProjectFileRepo::list_for_project(&state.pool, id)
        .await?
        .into_iter()
        .map(|f| AttachedFile {
            name: f.file_name,
            url: f.file_url,
        })
        .collect();

    let mut members: Vec<TeamMemberCard> = match project.team_id {
        Some(team_id) => MemberRepo::list_by_team(&state.pool, team_id)
            .await?
            .into_iter()
            .map(TeamMemberCard::from)
            .collect(),
        None => Vec::new(),
    };
    leaders_first(&mut members, |m| m.is_leader);

    Ok(Json(DataResponse {
        data: ProjectDetail {
            id: project.id,
            title: project.title,
            summary: project.summary,
            description: project.description,
            github_url: project.github_url,
            demo_url: project.demo_url,
            thumbnail_url: project.thumbnail_url,
            team_id: project.team_id,
            team_name: row.team_name,
            tags,
            images,
            members,
            files,
            created_at: project.created_at,
        },
    }))
}
