//! Route definitions for the public gallery.

use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET /         -> list (?q=)
/// GET /{id}     -> detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list))
        .route("/{id}", get(gallery::detail))
}
