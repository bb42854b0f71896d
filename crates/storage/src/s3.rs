//! S3-compatible object storage (AWS S3, MinIO, Supabase storage).

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::delete_objects::DeleteObjectsOutput;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;

use crate::{public_object_url, validate_object_path, ObjectStorage, StorageError};

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Buckets map one-to-one onto S3 buckets; paths are object keys.
pub struct S3Storage {
    client: Client,
    public_url: String,
}

impl S3Storage {
    pub fn new(settings: &S3Settings, public_url: String) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            "showcase-env",
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(settings.endpoint.clone())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            public_url,
        }
    }

    /// Whether `bucket/key` already exists.
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .is_some_and(|se| se.is_not_found());
                if not_found {
                    Ok(false)
                } else {
                    Err(StorageError::Backend(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
        upsert: bool,
    ) -> Result<(), StorageError> {
        validate_object_path(path)?;

        // S3 has no create-only PUT; emulate it with a prior HEAD.
        if !upsert && self.exists(bucket, path).await? {
            return Err(StorageError::AlreadyExists {
                bucket: bucket.to_string(),
                path: path.to_string(),
            });
        }

        self.client
            .put_object()
            .bucket(bucket)
            .key(path)
            .body(ByteStream::from(bytes.to_vec()))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(bucket, path, size = bytes.len(), "Stored object in S3");
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_object_url(&self.public_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        if paths.is_empty() {
            return Ok(());
        }

        let objects = paths
            .iter()
            .map(|p| {
                ObjectIdentifier::builder()
                    .key(p)
                    .build()
                    .map_err(|e| StorageError::Backend(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let output = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;
        delete_errors(&output)
    }
}

/// `DeleteObjects` answers 200 even when individual keys fail; those are
/// only reported in the body.
fn delete_errors(output: &DeleteObjectsOutput) -> Result<(), StorageError> {
    let failed: Vec<String> = output
        .errors()
        .iter()
        .map(|e| {
            format!(
                "{} ({}: {})",
                e.key().unwrap_or("?"),
                e.code().unwrap_or("unknown"),
                e.message().unwrap_or("")
            )
        })
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(StorageError::Backend(format!(
            "failed to delete {}",
            failed.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::Error as S3ObjectError;

    #[test]
    fn delete_without_errors_is_ok() {
        let output = DeleteObjectsOutput::builder().build();
        assert!(delete_errors(&output).is_ok());
    }

    #[test]
    fn per_key_delete_failure_is_a_backend_error() {
        let output = DeleteObjectsOutput::builder()
            .errors(
                S3ObjectError::builder()
                    .key("projects/p/a.png")
                    .code("AccessDenied")
                    .message("denied")
                    .build(),
            )
            .build();

        match delete_errors(&output) {
            Err(StorageError::Backend(msg)) => {
                assert!(msg.contains("projects/p/a.png"), "{msg}");
                assert!(msg.contains("AccessDenied"), "{msg}");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }
}
