//! Public object URLs for the local storage backend.
//!
//! The local backend writes under `STORAGE_LOCAL_ROOT/{bucket}/{path}` and
//! hands out `{public_url}/storage/v1/object/public/{bucket}/{path}`; this
//! router serves that prefix from disk. With the S3 backend the bucket host
//! serves the objects and nothing is mounted.

use axum::Router;
use showcase_storage::{StorageBackendType, StorageConfig, PUBLIC_OBJECT_PREFIX};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn router(config: &StorageConfig) -> Router<AppState> {
    match config.backend {
        StorageBackendType::Local => Router::new().nest_service(
            &format!("/{PUBLIC_OBJECT_PREFIX}"),
            ServeDir::new(&config.local_root),
        ),
        StorageBackendType::S3 => Router::new(),
    }
}
