//! Handlers for the `/admin/teams` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use showcase_core::error::CoreError;
use showcase_core::fields::{require_non_blank, trimmed_or_none};
use showcase_core::types::DbId;
use showcase_db::models::team::TeamInput;
use showcase_db::repositories::TeamRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ConfirmParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/teams
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let teams = TeamRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/admin/teams/options
///
/// `(id, name)` pairs for the team selectors of the member and project forms.
pub async fn options(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let teams = TeamRepo::list_options(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// POST /api/v1/admin/teams
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<TeamInput>,
) -> AppResult<impl IntoResponse> {
    let name = require_non_blank(&input.name, "Team name")?;
    let description = trimmed_or_none(input.description.as_deref());

    let team = TeamRepo::create(&state.pool, &name, description.as_deref()).await?;

    tracing::info!(team_id = %team.id, user_id = %admin.user_id, "Team created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

/// PUT /api/v1/admin/teams/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TeamInput>,
) -> AppResult<impl IntoResponse> {
    let name = require_non_blank(&input.name, "Team name")?;
    let description = trimmed_or_none(input.description.as_deref());

    let team = TeamRepo::update(&state.pool, id, &name, description.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Team", id }))?;

    tracing::info!(team_id = %id, user_id = %admin.user_id, "Team updated");

    Ok(Json(DataResponse { data: team }))
}

/// DELETE /api/v1/admin/teams/{id}?confirm=true
///
/// Members and projects of the team are kept, detached from it.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    params.require("a team")?;

    let deleted = TeamRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Team", id }));
    }

    tracing::info!(team_id = %id, user_id = %admin.user_id, "Team deleted");

    Ok(StatusCode::NO_CONTENT)
}
