// src/pipeline/build.rs

//! Static snapshot build.

use chrono::Utc;

use crate::error::Result;
use crate::pipeline::aggregate::collect_feed_for;
use crate::services::{PageFetcher, Source};
use crate::storage::{FeedStorage, WriteMetadata};

/// Run one aggregation cycle over `sources` and persist the feed.
///
/// Per-source failures end up inside the snapshot; only storage errors fail
/// the build.
pub async fn run_build(
    fetcher: &dyn PageFetcher,
    storage: &dyn FeedStorage,
    sources: &[Source],
) -> Result<WriteMetadata> {
    let start_time = Utc::now();
    log::info!("Building snapshot for {} sources", sources.len());

    let feed = collect_feed_for(fetcher, sources).await;
    let meta = storage.write_feed(&feed).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Snapshot written: {} areas ({} open, {} failed) in {}ms",
        meta.area_count,
        feed.open_count(),
        meta.failed_count,
        elapsed.num_milliseconds()
    );
    Ok(meta)
}
