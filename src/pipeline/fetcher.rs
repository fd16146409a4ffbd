//! HTTP fetcher implementation
//!
//! This module handles page requests for the scraper, including:
//! - Building HTTP clients with the fixed desktop identity header
//! - Optional proxy routing for both HTTP and HTTPS traffic
//! - A fixed pre-request delay acting as a simple rate limiter
//! - Error classification into connection vs. unexpected failures

use crate::pipeline::records::ErrorKind;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Proxy};
use std::time::Duration;
use thiserror::Error;

/// Identity header presented to target sites, matching a desktop Chrome build
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Classified failure from the fetch boundary
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure or a non-2xx HTTP response
    #[error("Connection error: {0}")]
    Connection(String),

    /// Anything else, including client construction failures
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Maps the error into the outcome-level error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Successful fetch payload: the response body plus its effective content type
#[derive(Debug, Clone)]
pub struct RawPage {
    pub body: String,
    pub content_type: String,
}

/// Builds an HTTP client for a scrape request
///
/// # Arguments
///
/// * `user_agent` - Identity header value to present
/// * `proxy` - Optional proxy endpoint; routes both HTTP and HTTPS traffic
/// * `timeout` - Optional per-request timeout; requests wait indefinitely
///   when `None`
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(FetchError::Unexpected)` - Client construction failed
pub fn build_http_client(
    user_agent: &str,
    proxy: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Client, FetchError> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true);

    if let Some(endpoint) = proxy {
        // A single endpoint carries both HTTP and HTTPS traffic.
        let proxy = Proxy::all(endpoint)
            .map_err(|e| FetchError::Unexpected(format!("Invalid proxy {}: {}", endpoint, e)))?;
        builder = builder.proxy(proxy);
    }

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| FetchError::Unexpected(e.to_string()))
}

/// Fetches a page, returning the body text and effective content type
///
/// Sleeps the fixed delay first, then issues a single GET. Non-2xx responses
/// and transport errors classify as `Connection`; body decoding failures as
/// `Unexpected`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `delay` - Pre-request delay enforced before the GET is sent
pub async fn fetch_page(client: &Client, url: &str, delay: Duration) -> Result<RawPage, FetchError> {
    // The delay is per invocation: concurrent fetches sleep independently,
    // so aggregate request rate scales with pool width rather than being
    // globally throttled.
    tokio::time::sleep(delay).await;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Connection(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Connection(format!("HTTP {} from {}", status, url)));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Unexpected(format!("Failed to read body: {}", e)))?;

    Ok(RawPage { body, content_type })
}
