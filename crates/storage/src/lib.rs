//! Object storage for uploaded blobs.
//!
//! [`ObjectStorage`] is the seam between the upload workflows and the actual
//! blob store. Two backends exist: [`local::LocalStorage`] for development
//! and [`s3::S3Storage`] for any S3-compatible service.

use async_trait::async_trait;

pub mod config;
pub mod local;
pub mod s3;

pub use config::{build_storage, StorageBackendType, StorageConfig};

/// URL prefix under which public objects are addressed, relative to the
/// configured public base URL.
pub const PUBLIC_OBJECT_PREFIX: &str = "storage/v1/object/public";

/// Errors from an object storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The object path is empty, absolute or escapes its bucket.
    #[error("Invalid object path '{0}'")]
    InvalidPath(String),

    /// An object already exists and `upsert` was not requested.
    #[error("Object already exists: {bucket}/{path}")]
    AlreadyExists { bucket: String, path: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote service rejected or failed the request.
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Invalid storage configuration: {0}")]
    Config(String),
}

/// Blob store with bucket-scoped paths and public URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `bucket/path`.
    ///
    /// Without `upsert`, an existing object is an error.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
        upsert: bool,
    ) -> Result<(), StorageError>;

    /// Public URL of `bucket/path`. Pure string construction: it never fails
    /// and does not check that the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Remove the listed objects. Missing objects are not an error.
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;
}

/// Build `{base}/storage/v1/object/public/{bucket}/{path}`.
pub fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/{PUBLIC_OBJECT_PREFIX}/{bucket}/{path}",
        base_url.trim_end_matches('/')
    )
}

/// Reject paths that are empty, absolute or contain `.`/`..` components.
pub(crate) fn validate_object_path(path: &str) -> Result<(), StorageError> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|c| c.is_empty() || c == "." || c == "..");
    if bad {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
