//! Raw response snapshots.
//!
//! Before parsing gets a chance to lose information, the exact payload
//! an upstream platform returned is captured keyed by source and page.
//! Capturing the same page again replaces the previous copy, so a
//! snapshot always reflects the latest fetch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

pub mod s3;

pub use s3::S3SnapshotStore;

/// Stores raw response payloads keyed by source and page.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Captures `raw` for `(source, page)`, replacing any previous
    /// capture of the same page.
    async fn capture(&self, source: &str, page: u32, page_size: u32, raw: &[u8]) -> Result<()>;
}

/// Filesystem-backed snapshot store.
///
/// Snapshots land under `{root}/{source}/page_{page:05}.json`. Writes
/// go to a temporary file first and are renamed into place, so a
/// concurrent reader never sees a half-written snapshot.
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn page_path(&self, source: &str, page: u32) -> PathBuf {
        self.root.join(source).join(format!("page_{page:05}.json"))
    }
}

#[async_trait]
impl SnapshotStore for FsSnapshotStore {
    async fn capture(&self, source: &str, page: u32, page_size: u32, raw: &[u8]) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        let path = self.page_path(source, page);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create snapshot directory")?;
        }

        // Write to temporary file, then atomic rename
        let temp_path = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .context("Failed to create temp snapshot file")?;

        file.write_all(raw)
            .await
            .context("Failed to write snapshot payload")?;

        file.flush()
            .await
            .context("Failed to flush snapshot payload")?;

        tokio::fs::rename(&temp_path, &path)
            .await
            .context("Failed to move snapshot into place")?;

        debug!(
            source,
            page,
            page_size,
            size_bytes = raw.len(),
            "captured raw snapshot"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn capture_writes_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        store
            .capture("bilibili", 3, 60, br#"{"code":0}"#)
            .await
            .unwrap();

        let path = dir.path().join("bilibili").join("page_00003.json");
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, r#"{"code":0}"#);
    }

    #[tokio::test]
    async fn capturing_the_same_page_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        store.capture("tencent", 1, 30, b"first").await.unwrap();
        store.capture("tencent", 1, 30, b"second").await.unwrap();

        let path = dir.path().join("tencent").join("page_00001.json");
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "second");
    }

    #[tokio::test]
    async fn no_temp_file_is_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        store.capture("iqiyi", 7, 24, b"{}").await.unwrap();

        let temp = dir.path().join("iqiyi").join("page_00007.tmp");
        assert!(!temp.exists());
    }
}
