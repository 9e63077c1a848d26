//! Local filesystem snapshot writer.
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! reader never observes a half-written snapshot.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Feed, OutputConfig};
use crate::storage::{FeedStorage, WriteMetadata};

/// Snapshot file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
    pretty: bool,
}

impl LocalStorage {
    /// Create a LocalStorage writing pretty JSON to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Create a LocalStorage from the `[output]` config section.
    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(&output.snapshot_path).pretty(output.pretty)
    }

    /// Toggle pretty-printed output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Snapshot file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl FeedStorage for LocalStorage {
    async fn write_feed(&self, feed: &Feed) -> Result<WriteMetadata> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(feed)?
        } else {
            serde_json::to_vec(feed)?
        };
        self.write_bytes(&bytes).await?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());

        Ok(WriteMetadata {
            area_count: feed.areas.len(),
            failed_count: feed.failed_count(),
            bytes: bytes.len(),
            timestamp: Utc::now(),
        })
    }

    async fn load_feed(&self) -> Result<Option<Feed>> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => {
                log::warn!("No snapshot found at {}", self.path.display());
                Ok(None)
            }
        }
    }
}
