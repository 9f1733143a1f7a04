//! Local filesystem implementation of `MediaStore`.
//!
//! A bucket is a directory under the configured root; objects are flat files
//! inside it. Public URLs are `{public_base}/{bucket}/{file}` and the binary
//! serves the root directory under that base path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use domains::error::{AppError, Result};
use domains::ports::MediaStore;

pub struct LocalMediaStore {
    root: PathBuf,
    /// URL prefix the root is served under, e.g. "/media". No trailing slash.
    public_base: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        let mut public_base = public_base.into();
        while public_base.ends_with('/') {
            public_base.pop();
        }
        Self {
            root: root.into(),
            public_base,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Object names are generated by us, but reject anything that could
    /// escape the bucket directory regardless.
    fn checked_segment(segment: &str) -> Result<&str> {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('/')
            || segment.contains('\\')
        {
            return Err(AppError::Internal(format!(
                "invalid storage path segment: {segment:?}"
            )));
        }
        Ok(segment)
    }

    fn object_path(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        let mut full = self.root.clone();
        full.push(Self::checked_segment(bucket)?);
        full.push(Self::checked_segment(path)?);
        Ok(full)
    }

    fn io_err(err: std::io::Error) -> AppError {
        AppError::Internal(err.to_string())
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        let mut dir = self.root.clone();
        dir.push(Self::checked_segment(bucket)?);
        fs::create_dir_all(&dir).await.map_err(Self::io_err)
    }

    async fn store(&self, bucket: &str, path: &str, data: Bytes) -> Result<()> {
        let full = self.object_path(bucket, path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(Self::io_err)?;
        }
        fs::write(&full, &data).await.map_err(Self::io_err)
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<()> {
        let full = self.object_path(bucket, path)?;
        fs::remove_file(&full).await.map_err(Self::io_err)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_base, bucket, path)
    }

    fn parse_public_url(&self, url: &str) -> Option<(String, String)> {
        let rest = url
            .strip_prefix(&self.public_base)?
            .strip_prefix('/')?;
        let (bucket, path) = rest.split_once('/')?;
        if Self::checked_segment(bucket).is_err() || Self::checked_segment(path).is_err() {
            return None;
        }
        Some((bucket.to_string(), path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, LocalMediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/media/");
        (dir, store)
    }

    #[tokio::test]
    async fn store_writes_under_the_bucket_directory() {
        let (dir, store) = store();
        store.ensure_bucket("gallery").await.unwrap();
        store
            .store("gallery", "abc.jpg", Bytes::from_static(b"jpeg bytes"))
            .await
            .unwrap();

        let on_disk = dir.path().join("gallery").join("abc.jpg");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn public_url_and_parse_are_inverses() {
        let (_dir, store) = store();
        let url = store.public_url("admin-destinations", "abc.jpg");
        assert_eq!(url, "/media/admin-destinations/abc.jpg");
        assert_eq!(
            store.parse_public_url(&url),
            Some(("admin-destinations".to_string(), "abc.jpg".to_string()))
        );
    }

    #[tokio::test]
    async fn foreign_urls_do_not_parse() {
        let (_dir, store) = store();
        assert_eq!(store.parse_public_url("https://example.com/x.jpg"), None);
        assert_eq!(store.parse_public_url("/other/gallery/x.jpg"), None);
        assert_eq!(store.parse_public_url("/media/../etc/passwd"), None);
    }

    #[tokio::test]
    async fn removing_a_missing_object_is_an_error_for_the_caller_to_ignore() {
        let (_dir, store) = store();
        store.ensure_bucket("gallery").await.unwrap();
        let err = store.remove("gallery", "nope.jpg").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn path_escapes_are_rejected() {
        let (_dir, store) = store();
        let err = store
            .store("gallery", "../escape.jpg", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
