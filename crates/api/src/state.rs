use std::sync::Arc;

use showcase_storage::ObjectStorage;
use showcase_workflow::{MemberProfiles, PgStore, ProjectUpsert};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: showcase_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Project create/edit workflow.
    pub projects: ProjectUpsert,
    /// Member create/edit workflow.
    pub members: MemberProfiles,
}

impl AppState {
    /// Wire the workflows to the Postgres store and the given storage backend.
    pub fn new(
        pool: showcase_db::DbPool,
        config: Arc<ServerConfig>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            projects: ProjectUpsert::new(store.clone(), Arc::clone(&storage)),
            members: MemberProfiles::new(store, storage),
            pool,
            config,
        }
    }
}
