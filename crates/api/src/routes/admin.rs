//! Route definitions for the back-office. Every handler requires the admin role.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{dashboard, members, projects, teams};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard                               -> dashboard::summary
///
/// GET    /teams                                   -> teams::list
/// POST   /teams                                   -> teams::create
/// GET    /teams/options                           -> teams::options
/// PUT    /teams/{id}                              -> teams::update
/// DELETE /teams/{id}                              -> teams::delete
///
/// GET    /members                                 -> members::list
/// POST   /members                                 -> members::create
/// PUT    /members/{id}                            -> members::update
/// DELETE /members/{id}                            -> members::delete
///
/// GET    /projects                                -> projects::list
/// POST   /projects                                -> projects::create
/// GET    /projects/{id}                           -> projects::get_by_id
/// PUT    /projects/{id}                           -> projects::update
/// DELETE /projects/{id}                           -> projects::delete
/// DELETE /projects/{id}/images/{image_id}         -> projects::remove_image
/// DELETE /projects/{id}/files/{file_id}           -> projects::delete_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::summary))
        .route("/teams", get(teams::list).post(teams::create))
        .route("/teams/options", get(teams::options))
        .route("/teams/{id}", put(teams::update).delete(teams::delete))
        .route("/members", get(members::list).post(members::create))
        .route("/members/{id}", put(members::update).delete(members::delete))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/projects/{id}/images/{image_id}",
            delete(projects::remove_image),
        )
        .route(
            "/projects/{id}/files/{file_id}",
            delete(projects::delete_file),
        )
}
