//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use showcase_db::models::dashboard::DashboardCounts;
use showcase_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub counts: DashboardCounts,
    pub admin_email: String,
}

/// GET /api/v1/admin/dashboard
///
/// Row counts of teams, projects and members plus the signed-in admin.
pub async fn summary(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let counts = DashboardRepo::counts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: DashboardSummary {
            counts,
            admin_email: admin.email,
        },
    }))
}
