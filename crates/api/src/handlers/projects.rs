//! Handlers for the `/admin/projects` resource.
//!
//! Create and edit run the project upsert workflow; the response carries the
//! saved project plus any warnings from child steps that were skipped.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use showcase_core::error::CoreError;
use showcase_core::progress::{ProgressSink, ProgressStage};
use showcase_core::search::{matches_filter, matches_term};
use showcase_core::types::DbId;
use showcase_db::models::project::{Project, ProjectListing};
use showcase_db::models::project_file::ProjectFile;
use showcase_db::models::project_image::ProjectImage;
use showcase_db::repositories::{ProjectFileRepo, ProjectImageRepo, ProjectRepo, ProjectTagRepo};
use showcase_workflow::UpsertOutcome;

use crate::error::{AppError, AppResult};
use crate::handlers::form;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ConfirmParams, ListFilter};
use crate::response::{DataResponse, OutcomeResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Everything the edit form shows for an existing project.
#[derive(Debug, Serialize)]
pub struct ProjectEditView {
    #[serde(flatten)]
    pub project: ProjectListing,
    pub tags: Vec<String>,
    pub images: Vec<ProjectImage>,
    pub files: Vec<ProjectFile>,
}

/// Result of a create or edit.
#[derive(Debug, Serialize)]
pub struct SavedProject {
    #[serde(flatten)]
    pub project: Project,
    pub tags: Vec<String>,
    /// Gallery rows added by this request.
    pub images: Vec<ProjectImage>,
    /// File rows added by this request.
    pub files: Vec<ProjectFile>,
}

fn saved(outcome: UpsertOutcome) -> OutcomeResponse<SavedProject> {
    OutcomeResponse {
        data: SavedProject {
            project: outcome.project,
            tags: outcome.tags,
            images: outcome.images,
            files: outcome.files,
        },
        warnings: outcome.warnings,
    }
}

/// Progress sink that forwards upload progress to the request's trace span.
struct TraceProgress {
    project_id: Option<DbId>,
}

impl ProgressSink for TraceProgress {
    fn report(&self, stage: ProgressStage, percent: u8) {
        tracing::debug!(project_id = ?self.project_id, ?stage, percent, "Upload progress");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects?q=&team_id=
///
/// Newest first. `q` matches title or summary case-insensitively.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<impl IntoResponse> {
    let projects: Vec<_> = ProjectRepo::list_with_team(&state.pool, None)
        .await?
        .into_iter()
        .map(|row| row.into_listing())
        .filter(|p| {
            matches_term(
                filter.term(),
                &[Some(p.project.title.as_str()), p.project.summary.as_deref()],
            ) && matches_filter(filter.team_id.as_ref(), p.project.team_id.as_ref())
        })
        .collect();

    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_with_team(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let tags = ProjectTagRepo::list_for_project(&state.pool, id).await?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;
    let files = ProjectFileRepo::list_for_project(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ProjectEditView {
            project: project.into_listing(),
            tags,
            images,
            files,
        },
    }))
}

/// POST /api/v1/admin/projects
///
/// Multipart form, see [`form::project_submission`]. Returns 201 even when
/// some images or files were skipped; those are listed in `warnings`.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let submission = form::project_submission(multipart).await?;
    let progress = TraceProgress { project_id: None };
    let outcome = state.projects.create(submission, &progress).await?;

    tracing::info!(
        project_id = %outcome.project.id,
        user_id = %admin.user_id,
        warnings = outcome.warnings.len(),
        "Project saved",
    );

    Ok((StatusCode::CREATED, Json(saved(outcome))))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Scalar fields are replaced, new images and files are appended and the tag
/// set is replaced by the submitted one.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let submission = form::project_submission(multipart).await?;
    let progress = TraceProgress {
        project_id: Some(id),
    };
    let outcome = state.projects.edit(id, submission, &progress).await?;

    tracing::info!(
        project_id = %id,
        user_id = %admin.user_id,
        warnings = outcome.warnings.len(),
        "Project saved",
    );

    Ok(Json(saved(outcome)))
}

/// DELETE /api/v1/admin/projects/{id}?confirm=true
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    params.require("a project")?;

    state.projects.delete_project(id).await?;

    tracing::info!(project_id = %id, user_id = %admin.user_id, "Project removed");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/projects/{id}/images/{image_id}
pub async fn remove_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.projects.remove_image(id, image_id).await?;

    tracing::info!(project_id = %id, image_id = %image_id, user_id = %admin.user_id, "Gallery image removed");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/projects/{id}/files/{file_id}
pub async fn delete_file(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, file_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.projects.delete_file(id, file_id).await?;

    tracing::info!(project_id = %id, file_id = %file_id, user_id = %admin.user_id, "Attached file removed");

    Ok(StatusCode::NO_CONTENT)
}
