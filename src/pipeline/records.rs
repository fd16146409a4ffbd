//! Data model for scrape requests and outcomes
//!
//! All types here are created per-request and immutable after construction;
//! nothing outlives the call that produced it except files written to disk.

use crate::pipeline::extractor::SelectorConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single scrape job: the target URL plus per-request options
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// The URL to scrape
    pub url: String,

    /// Selector configuration; `None` means the full default set applies
    pub selectors: Option<SelectorConfig>,

    /// Proxy endpoint routing both HTTP and HTTPS traffic
    pub proxy: Option<String>,

    /// Whether embedded images should be downloaded
    pub download_images: bool,
}

impl ScrapeRequest {
    /// Creates a request for a URL with no selectors, no proxy, no images
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            selectors: None,
            proxy: None,
            download_images: false,
        }
    }

    /// Attaches a selector configuration to the request
    pub fn with_selectors(mut self, selectors: SelectorConfig) -> Self {
        self.selectors = Some(selectors);
        self
    }

    /// Routes the request through a proxy endpoint
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enables or disables image download for the request
    pub fn with_images(mut self, download_images: bool) -> Self {
        self.download_images = download_images;
        self
    }
}

/// Outcome of scraping a single URL
///
/// A tagged union: exactly one of Success/Failure holds per request.
#[derive(Debug, Clone)]
pub enum ScrapeOutcome {
    Success(PageRecord),
    Failure(ScrapeFailure),
}

impl ScrapeOutcome {
    /// Returns true for the Success variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Consumes the outcome, yielding the record for Success and None otherwise
    pub fn into_record(self) -> Option<PageRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }
}

/// Structured content extracted from one successfully fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The URL the page was fetched from
    pub url: String,

    /// When extraction completed for this page
    pub fetched_at: DateTime<Utc>,

    /// Page title, or the placeholder text when no element matched
    pub title: String,

    /// Up to five paragraph texts, trimmed, in document order
    pub paragraphs: Vec<String>,

    /// Up to ten links carrying an href, in document order
    pub links: Vec<LinkEntry>,

    /// Downloaded images; present only when the request asked for them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<SavedImage>>,
}

/// A link found on a page: visible text plus the raw href attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub text: String,
    pub href: String,
}

/// A successfully downloaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedImage {
    /// Absolute URL the image was fetched from
    pub original_url: String,

    /// Where the image was written on disk
    pub saved_path: PathBuf,
}

/// Classification of a failed scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport-level failures and non-2xx HTTP responses
    Connection,
    /// Anything else, including client construction failures
    Unexpected,
}

/// Failure record for a single URL
#[derive(Debug, Clone)]
pub struct ScrapeFailure {
    pub url: String,
    pub kind: ErrorKind,
    pub message: String,
}
