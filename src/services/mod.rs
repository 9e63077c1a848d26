//! Service layer for the trail status aggregator.
//!
//! This module contains the business logic for:
//! - Status classification (`classifier`)
//! - Page fetching (`PageFetcher`, `HttpFetcher`)
//! - Site-specific parsing (`Extractor`)
//! - The source list (`registry`)

pub mod classifier;
pub mod extractors;
mod fetcher;
pub mod registry;

pub use extractors::Extractor;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use registry::Source;
