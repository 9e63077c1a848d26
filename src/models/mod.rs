// src/models/mod.rs

//! Domain models for the trail status aggregator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod area;
mod config;
mod status;

// Re-export all public types
pub use area::{AreaReport, AreaResult, Feed, Trail};
pub use config::{Config, CrawlerConfig, LoggingConfig, OutputConfig};
pub use status::StatusValue;
