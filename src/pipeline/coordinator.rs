//! Scrape orchestration
//!
//! Composes the fetcher, extractor, and image downloader into a single-URL
//! scrape operation, and fans that operation out over URL batches with
//! bounded concurrency. A failing URL never aborts its siblings; batch
//! callers receive only the successful records.

use crate::config::Config;
use crate::pipeline::extractor::extract;
use crate::pipeline::fetcher::{build_http_client, fetch_page, FetchError, DESKTOP_USER_AGENT};
use crate::pipeline::images::download_images;
use crate::pipeline::pool::run_bounded;
use crate::pipeline::records::{PageRecord, ScrapeFailure, ScrapeOutcome, ScrapeRequest};
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Scrapes a single URL
///
/// # Flow
///
/// 1. Build an HTTP client honoring the request's proxy
/// 2. Fetch the page behind the fixed pre-request delay
/// 3. Extract content with the effective selector configuration
/// 4. Optionally download embedded images
///
/// Default selectors apply only when the request carries no selector
/// configuration at all; a supplied configuration with missing fields is
/// used as-is.
///
/// # Arguments
///
/// * `request` - The scrape job to run
/// * `config` - Runtime settings (delay, timeout, image directory)
///
/// # Returns
///
/// A `ScrapeOutcome`: `Success` with the extracted record, or `Failure`
/// carrying the classified fetch error.
pub async fn scrape_one(request: ScrapeRequest, config: &Config) -> ScrapeOutcome {
    let delay = Duration::from_millis(config.scraper.request_delay_ms);
    let timeout = config.scraper.request_timeout_secs.map(Duration::from_secs);
    let user_agent = config
        .http
        .user_agent
        .as_deref()
        .unwrap_or(DESKTOP_USER_AGENT);

    let client = match build_http_client(user_agent, request.proxy.as_deref(), timeout) {
        Ok(client) => client,
        Err(e) => return failure(&request.url, e),
    };

    let raw = match fetch_page(&client, &request.url, delay).await {
        Ok(raw) => raw,
        Err(e) => return failure(&request.url, e),
    };
    tracing::debug!(
        "Fetched {} ({}, {} bytes)",
        request.url,
        raw.content_type,
        raw.body.len()
    );

    let effective = request.selectors.clone().unwrap_or_default();
    let content = extract(&raw.body, &effective);
    let fetched_at = Utc::now();

    let images = if request.download_images {
        match Url::parse(&request.url) {
            Ok(page_url) => Some(
                download_images(
                    &client,
                    &page_url,
                    &content.image_sources,
                    Path::new(&config.output.images_dir),
                )
                .await,
            ),
            Err(e) => {
                // The fetch already succeeded, so this is effectively
                // unreachable; record an empty outcome rather than failing.
                tracing::warn!("Cannot resolve image srcs against {}: {}", request.url, e);
                Some(Vec::new())
            }
        }
    } else {
        None
    };

    ScrapeOutcome::Success(PageRecord {
        url: request.url,
        fetched_at,
        title: content.title,
        paragraphs: content.paragraphs,
        links: content.links,
        images,
    })
}

/// Scrapes a batch of URLs over the bounded worker pool
///
/// Requests are dispatched to at most `max_concurrent_requests` workers at a
/// time. The returned records are the successes only, in submission order
/// with failed slots skipped; failures surface via warn-level logging, not
/// the return value.
pub async fn scrape_many(requests: Vec<ScrapeRequest>, config: &Config) -> Vec<PageRecord> {
    let width = config.scraper.max_concurrent_requests as usize;
    let total = requests.len();

    let jobs: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let config = config.clone();
            async move { scrape_one(request, &config).await }
        })
        .collect();

    let outcomes = run_bounded(width, jobs).await;

    let mut records = Vec::new();
    for outcome in outcomes.into_iter().flatten() {
        match outcome {
            ScrapeOutcome::Success(record) => records.push(record),
            ScrapeOutcome::Failure(failed) => {
                tracing::warn!(
                    "Scrape failed for {} ({:?}): {}",
                    failed.url,
                    failed.kind,
                    failed.message
                );
            }
        }
    }

    tracing::info!("Batch complete: {} of {} URLs succeeded", records.len(), total);
    records
}

/// Wraps a fetch error into the failure variant for a URL
fn failure(url: &str, error: FetchError) -> ScrapeOutcome {
    ScrapeOutcome::Failure(ScrapeFailure {
        url: url.to_string(),
        kind: error.kind(),
        message: error.to_string(),
    })
}
