//! Page-Harvest: a concurrent web content scraper
//!
//! This crate fetches web pages, extracts structured content via configurable
//! CSS selectors, optionally downloads embedded images, and persists results
//! as JSON or CSV.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for page-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] pipeline::FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for page-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{save_record, save_records, OutputFormat};
pub use pipeline::{
    scrape_many, scrape_one, ErrorKind, PageRecord, ScrapeOutcome, ScrapeRequest, SelectorConfig,
};
pub use url::is_valid_url;
