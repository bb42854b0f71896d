pub mod admin;
pub mod auth;
pub mod gallery;
pub mod health;
pub mod storage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current account (requires auth)
///
/// /projects                                        public gallery list (?q=)
/// /projects/{id}                                   public project detail
///
/// /admin/dashboard                                 counts (admin only)
/// /admin/teams                                     list, create
/// /admin/teams/options                             id + name pairs for selectors
/// /admin/teams/{id}                                update, delete (?confirm=true)
/// /admin/members                                   list (?q=&team_id=), create
/// /admin/members/{id}                              update, delete (?confirm=true)
/// /admin/projects                                  list (?q=&team_id=), create
/// /admin/projects/{id}                             edit view, update, delete (?confirm=true)
/// /admin/projects/{id}/images/{image_id}           remove gallery image
/// /admin/projects/{id}/files/{file_id}             delete attached file
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout, me).
        .nest("/auth", auth::router())
        // Public gallery.
        .nest("/projects", gallery::router())
        // Back-office.
        .nest("/admin", admin::router())
}
