// src/pipeline/aggregate.rs

//! One aggregation cycle over the source registry.
//!
//! Every extractor starts without waiting on the others and the cycle waits
//! for all of them to settle. A failing or panicking extractor only affects
//! its own entry; the result always has one entry per source, in registry
//! order.

use std::panic::AssertUnwindSafe;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::{AreaReport, AreaResult, Feed};
use crate::services::registry::{self, Source};
use crate::services::PageFetcher;

/// Run every registered extractor once.
pub async fn fetch_all_statuses(fetcher: &dyn PageFetcher) -> Vec<AreaResult> {
    fetch_statuses(fetcher, registry::sources()).await
}

/// Run the extractors of `sources` once, preserving their order.
pub async fn fetch_statuses(fetcher: &dyn PageFetcher, sources: &[Source]) -> Vec<AreaResult> {
    let fetched_at = Utc::now();

    let outcomes = join_all(sources.iter().map(|source| run_isolated(fetcher, source))).await;

    let results: Vec<AreaResult> = sources
        .iter()
        .zip(outcomes)
        .map(|(source, outcome)| match outcome {
            Ok(report) => merge_report(source, fetched_at, report),
            Err(error) => {
                log::warn!("Failed to fetch {} ({}): {}", source.id, source.url, error);
                failed_result(source, fetched_at, &error)
            }
        })
        .collect();

    let failures = results.iter().filter(|r| r.is_error()).count();
    log::info!(
        "Aggregated {} sources: {} ok, {} failed",
        results.len(),
        results.len() - failures,
        failures
    );
    results
}

/// Run one cycle over the full registry and wrap it as a feed.
pub async fn collect_feed(fetcher: &dyn PageFetcher) -> Feed {
    Feed::new(fetch_all_statuses(fetcher).await)
}

/// Run one cycle over `sources` and wrap it as a feed.
pub async fn collect_feed_for(fetcher: &dyn PageFetcher, sources: &[Source]) -> Feed {
    Feed::new(fetch_statuses(fetcher, sources).await)
}

/// Run one extractor, turning a panic into a parse anomaly.
async fn run_isolated(fetcher: &dyn PageFetcher, source: &Source) -> Result<AreaReport> {
    AssertUnwindSafe(source.extractor.extract(fetcher, source))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AppError::parse(source.id, panic_message(panic.as_ref()))))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("extractor panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("extractor panicked: {message}")
    } else {
        "extractor panicked".to_string()
    }
}

fn merge_report(source: &Source, fetched_at: DateTime<Utc>, report: AreaReport) -> AreaResult {
    AreaResult {
        id: source.id.to_string(),
        name: source.name.to_string(),
        url: source.url.to_string(),
        webcam_url: report
            .webcam_url
            .or_else(|| source.webcam_url.map(str::to_string)),
        fetched_at,
        updated: report.updated,
        open: report.open,
        summary: report.summary,
        trails: report.trails,
        error: None,
    }
}

fn failed_result(source: &Source, fetched_at: DateTime<Utc>, error: &AppError) -> AreaResult {
    AreaResult {
        id: source.id.to_string(),
        name: source.name.to_string(),
        url: source.url.to_string(),
        webcam_url: source.webcam_url.map(str::to_string),
        fetched_at,
        updated: None,
        open: false,
        summary: None,
        trails: Vec::new(),
        error: Some(error.to_string()),
    }
}
