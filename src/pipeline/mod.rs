//! Pipeline entry points.
//!
//! - `fetch_all_statuses`: One aggregation cycle over the registry
//! - `run_build`: Aggregate and write the static snapshot

pub mod aggregate;
pub mod build;

pub use aggregate::{collect_feed, collect_feed_for, fetch_all_statuses, fetch_statuses};
pub use build::run_build;
