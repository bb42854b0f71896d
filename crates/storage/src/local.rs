//! Filesystem-backed object storage.
//!
//! Objects live at `{root}/{bucket}/{path}`. The API serves `root` under the
//! public object prefix so the URLs behave like a hosted bucket.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{public_object_url, validate_object_path, ObjectStorage, StorageError};

pub struct LocalStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into(),
        }
    }

    fn object_path(&self, bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
        validate_object_path(bucket)?;
        validate_object_path(path)?;
        Ok(self.root.join(bucket).join(path))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        _content_type: Option<&str>,
        upsert: bool,
    ) -> Result<(), StorageError> {
        let target = self.object_path(bucket, path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if upsert {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = options.open(&target).await.map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                StorageError::AlreadyExists {
                    bucket: bucket.to_string(),
                    path: path.to_string(),
                }
            } else {
                StorageError::Io(e)
            }
        })?;
        write_or_discard(&target, file, bytes).await?;

        tracing::debug!(bucket, path, size = bytes.len(), "Stored object on disk");
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_object_url(&self.public_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            let target = self.object_path(bucket, path)?;
            match fs::remove_file(&target).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Write `bytes` through `writer`; on failure the half-written `target` is
/// removed so a retry without upsert does not hit `AlreadyExists`.
async fn write_or_discard<W>(target: &Path, mut writer: W, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        if let Err(cleanup) = fs::remove_file(target).await {
            if cleanup.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    path = %target.display(),
                    error = %cleanup,
                    "Could not remove partially written object"
                );
            }
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use assert_matches::assert_matches;

    use super::*;

    /// Writer whose every write fails, standing in for a full disk.
    struct BrokenWriter;

    impl AsyncWrite for BrokenWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("disk full")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:3000")
    }

    #[tokio::test]
    async fn upload_writes_file_under_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);

        store
            .upload("project-images", "projects/p/images/a.png", b"png", Some("image/png"), false)
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("project-images/projects/p/images/a.png"))
            .unwrap();
        assert_eq!(written, b"png");
    }

    #[tokio::test]
    async fn second_upload_without_upsert_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);

        store.upload("b", "x.txt", b"1", None, false).await.unwrap();
        let err = store.upload("b", "x.txt", b"2", None, false).await.unwrap_err();
        assert_matches!(err, StorageError::AlreadyExists { .. });
    }

    #[tokio::test]
    async fn upsert_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);

        store.upload("member-profiles", "members/m-a.png", b"old-bytes", None, true).await.unwrap();
        store.upload("member-profiles", "members/m-a.png", b"new", None, true).await.unwrap();

        let written = std::fs::read(dir.path().join("member-profiles/members/m-a.png")).unwrap();
        assert_eq!(written, b"new");
    }

    #[tokio::test]
    async fn remove_ignores_missing_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);

        store.upload("b", "keep/x.txt", b"1", None, false).await.unwrap();
        store
            .remove("b", &["keep/x.txt".to_string(), "never/existed.txt".to_string()])
            .await
            .unwrap();
        assert!(!dir.path().join("b/keep/x.txt").exists());
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        let err = store.upload("b", "../escape.txt", b"1", None, false).await.unwrap_err();
        assert_matches!(err, StorageError::InvalidPath(_));
    }

    #[tokio::test]
    async fn failed_write_removes_partial_object() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("half.png");
        std::fs::write(&target, b"").unwrap();

        let err = write_or_discard(&target, BrokenWriter, b"png-bytes")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn upload_can_be_retried_after_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        let target = dir.path().join("b/retry.txt");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"").unwrap();

        write_or_discard(&target, BrokenWriter, b"1").await.unwrap_err();
        store.upload("b", "retry.txt", b"1", None, false).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"1");
    }

    #[test]
    fn public_url_uses_object_prefix() {
        let store = LocalStorage::new("/tmp/x", "http://localhost:3000");
        assert_eq!(
            store.public_url("project-files", "projects/p/files/a.pdf"),
            "http://localhost:3000/storage/v1/object/public/project-files/projects/p/files/a.pdf"
        );
    }
}
