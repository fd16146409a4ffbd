//! Core scraping pipeline
//!
//! This module contains the concurrent scraping logic, including:
//! - Rate-limited HTTP fetching with failure classification
//! - Selector-driven content extraction
//! - Embedded image retrieval
//! - Bounded-concurrency fan-out over URL batches

mod coordinator;
mod extractor;
mod fetcher;
mod images;
mod pool;
mod records;

pub use coordinator::{scrape_many, scrape_one};
pub use extractor::{
    extract, ExtractedContent, SelectorConfig, MAX_LINKS, MAX_PARAGRAPHS, TITLE_FALLBACK,
};
pub use fetcher::{build_http_client, fetch_page, FetchError, RawPage, DESKTOP_USER_AGENT};
pub use images::download_images;
pub use pool::run_bounded;
pub use records::{
    ErrorKind, LinkEntry, PageRecord, SavedImage, ScrapeFailure, ScrapeOutcome, ScrapeRequest,
};
