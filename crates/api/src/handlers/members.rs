//! Handlers for the `/admin/members` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use showcase_core::error::CoreError;
use showcase_core::progress::NoProgress;
use showcase_core::search::{matches_filter, matches_term};
use showcase_core::types::DbId;
use showcase_db::repositories::MemberRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::form;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ConfirmParams, ListFilter};
use crate::response::{DataResponse, OutcomeResponse};
use crate::state::AppState;

/// GET /api/v1/admin/members?q=&team_id=
///
/// Members ordered by name with their team name. `q` matches name,
/// affiliation or role case-insensitively.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<impl IntoResponse> {
    let members: Vec<_> = MemberRepo::list_with_team(&state.pool)
        .await?
        .into_iter()
        .map(|row| row.into_listing())
        .filter(|m| {
            matches_term(
                filter.term(),
                &[
                    Some(m.member.name.as_str()),
                    m.member.affiliation.as_deref(),
                    m.member.role.as_deref(),
                ],
            ) && matches_filter(filter.team_id.as_ref(), m.member.team_id.as_ref())
        })
        .collect();

    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/admin/members
///
/// Multipart form; `profile_image` is optional.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let submission = form::member_submission(multipart).await?;
    let outcome = state.members.create(submission, &NoProgress).await?;

    tracing::info!(
        member_id = %outcome.member.id,
        user_id = %admin.user_id,
        warnings = outcome.warnings.len(),
        "Member saved",
    );

    Ok((
        StatusCode::CREATED,
        Json(OutcomeResponse {
            data: outcome.member,
            warnings: outcome.warnings,
        }),
    ))
}

/// PUT /api/v1/admin/members/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let submission = form::member_submission(multipart).await?;
    let outcome = state.members.update(id, submission, &NoProgress).await?;

    tracing::info!(
        member_id = %id,
        user_id = %admin.user_id,
        warnings = outcome.warnings.len(),
        "Member saved",
    );

    Ok(Json(OutcomeResponse {
        data: outcome.member,
        warnings: outcome.warnings,
    }))
}

/// DELETE /api/v1/admin/members/{id}?confirm=true
///
/// The profile picture blob is left in storage.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    params.require("a member")?;

    let deleted = MemberRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }));
    }

    tracing::info!(member_id = %id, user_id = %admin.user_id, "Member deleted");

    Ok(StatusCode::NO_CONTENT)
}
