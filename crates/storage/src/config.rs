//! Storage backend selection and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::local::LocalStorage;
use crate::s3::{S3Settings, S3Storage};
use crate::{ObjectStorage, StorageError};

/// Default public base URL for the local backend (the API serves the files).
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Default directory for the local backend.
const DEFAULT_LOCAL_ROOT: &str = "storage";

/// Default S3 region when none is configured.
const DEFAULT_S3_REGION: &str = "us-east-1";

/// Which blob store to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendType {
    Local,
    S3,
}

impl StorageBackendType {
    /// Parse from the `STORAGE_BACKEND` value.
    pub fn from_name(name: &str) -> Result<Self, StorageError> {
        match name {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(StorageError::Config(format!(
                "Unknown storage backend '{other}'. Must be one of: local, s3"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }
}

/// Object storage configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Base of every public object URL.
    pub public_url: String,
    /// Root directory of the local backend.
    pub local_root: PathBuf,
    /// Endpoint, region and credentials of the S3 backend.
    pub s3: Option<S3Settings>,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `STORAGE_BACKEND`       | `local`                 |
    /// | `STORAGE_PUBLIC_URL`    | `http://localhost:3000` |
    /// | `STORAGE_LOCAL_ROOT`    | `storage`               |
    /// | `S3_ENDPOINT`           | required for `s3`       |
    /// | `S3_REGION`             | `us-east-1`             |
    /// | `S3_ACCESS_KEY_ID`      | required for `s3`       |
    /// | `S3_SECRET_ACCESS_KEY`  | required for `s3`       |
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = StorageBackendType::from_name(
            &std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into()),
        )?;

        let public_url =
            std::env::var("STORAGE_PUBLIC_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_URL.into());
        let local_root = std::env::var("STORAGE_LOCAL_ROOT")
            .unwrap_or_else(|_| DEFAULT_LOCAL_ROOT.into())
            .into();

        let s3 = match backend {
            StorageBackendType::Local => None,
            StorageBackendType::S3 => Some(S3Settings {
                endpoint: require_env("S3_ENDPOINT")?,
                region: std::env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_S3_REGION.into()),
                access_key_id: require_env("S3_ACCESS_KEY_ID")?,
                secret_access_key: require_env("S3_SECRET_ACCESS_KEY")?,
            }),
        };

        Ok(Self {
            backend,
            public_url,
            local_root,
            s3,
        })
    }
}

fn require_env(key: &str) -> Result<String, StorageError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(StorageError::Config(format!(
            "{key} must be set for the s3 storage backend"
        ))),
    }
}

/// Construct the configured backend behind a shared trait object.
pub fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match config.backend {
        StorageBackendType::Local => Ok(Arc::new(LocalStorage::new(
            config.local_root.clone(),
            config.public_url.clone(),
        ))),
        StorageBackendType::S3 => {
            let settings = config.s3.as_ref().ok_or_else(|| {
                StorageError::Config("s3 backend selected without S3 settings".into())
            })?;
            Ok(Arc::new(S3Storage::new(settings, config.public_url.clone())))
        }
    }
}
