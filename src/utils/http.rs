// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create the HTTP client every extractor fetches through.
///
/// Sends the configured `User-Agent` and `Accept-Language` on every request
/// and follows redirects up to `max_redirects`.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| AppError::config(format!("Invalid accept_language: {e}")))?;
    headers.insert(ACCEPT_LANGUAGE, language);

    let mut builder = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .redirect(Policy::limited(config.max_redirects));

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}
