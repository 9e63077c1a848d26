//! Application configuration structures.

use std::fs;
use std::path::Path;

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP fetch behavior
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Snapshot output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log verbosity
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.accept_language.trim().is_empty() {
            return Err(AppError::validation("crawler.accept_language is empty"));
        }
        if HeaderValue::from_str(&self.crawler.accept_language).is_err() {
            return Err(AppError::validation(
                "crawler.accept_language is not a valid header value",
            ));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.output.snapshot_path.trim().is_empty() {
            return Err(AppError::validation("output.snapshot_path is empty"));
        }
        Ok(())
    }
}

/// HTTP client settings shared by every extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept-Language header for HTTP requests
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Maximum redirects followed per request
    #[serde(default = "defaults::max_redirects")]
    pub max_redirects: usize,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept_language: defaults::accept_language(),
            max_redirects: defaults::max_redirects(),
            timeout_secs: None,
        }
    }
}

/// Static snapshot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where `build` writes the feed JSON
    #[serde(default = "defaults::snapshot_path")]
    pub snapshot_path: String,

    /// Pretty-print the snapshot
    #[serde(default = "defaults::pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: defaults::snapshot_path(),
            pretty: defaults::pretty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "LoipencheckBot/1.0 (+https://example.com/contact)".into()
    }
    pub fn accept_language() -> String {
        "de-CH,de;q=0.9,en;q=0.8".into()
    }
    pub fn max_redirects() -> usize {
        10
    }
    pub fn snapshot_path() -> String {
        "public/data/loipen.json".into()
    }
    pub fn pretty() -> bool {
        true
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
