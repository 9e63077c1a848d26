//! Storage abstractions for the feed snapshot.
//!
//! The static build writes a single JSON document, the same payload a live
//! endpoint would answer with:
//!
//! ```text
//! public/data/
//! └── loipen.json     # { "generatedAt": ..., "areas": [...] }
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Feed;

pub use local::LocalStorage;

/// Metadata about a snapshot write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of areas in the snapshot
    pub area_count: usize,
    /// Areas that carry an error
    pub failed_count: usize,
    /// Bytes written
    pub bytes: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for feed snapshot backends.
#[async_trait]
pub trait FeedStorage: Send + Sync {
    /// Replace the stored snapshot with `feed`.
    async fn write_feed(&self, feed: &Feed) -> Result<WriteMetadata>;

    /// Load the stored snapshot, `None` when nothing was written yet.
    async fn load_feed(&self) -> Result<Option<Feed>>;
}
