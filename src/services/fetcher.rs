//! Page fetching.
//!
//! Extractors never talk to `reqwest` directly; they go through
//! [`PageFetcher`], so a cycle can be driven from canned pages in tests.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils::http::create_client;

/// Source of raw page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the body text.
    ///
    /// Fails with [`AppError::Fetch`] on a non-2xx status and with
    /// [`AppError::Http`] when no response arrives.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from crawler settings.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, status.as_u16()));
        }
        let body = response.text().await?;
        log::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
