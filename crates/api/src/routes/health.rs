//! Liveness check, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database check fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Configured object storage backend (`local` or `s3`).
    pub storage: &'static str,
}

/// GET /health
///
/// Always answers 200 so the process stays routable while the database is
/// down; callers read `status`.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match showcase_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage: state.config.storage.backend.name(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
