use showcase_core::error::CoreError;
use showcase_storage::StorageError;

/// Failure of a single store call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A non-SQL backend (or a test double) refused the call.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Fatal workflow failure: the operation did not take effect as a whole.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Validation or not-found; no write was attempted or the target is gone.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The primary row write (or a surfaced child delete) failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure inside a non-fatal step. Rendered into a warning.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
