use serde::Deserialize;

/// Main configuration structure for page-harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Scraping behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Maximum number of concurrent page fetches in batch mode
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Fixed delay applied before every request (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout in seconds; requests wait indefinitely when unset
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 5,
            request_delay_ms: 1000,
            request_timeout_secs: None,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Override for the identity header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where downloaded images are stored
    #[serde(rename = "images-dir")]
    pub images_dir: String,

    /// Base path for serialized results, without extension
    #[serde(rename = "results-path")]
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            images_dir: "pictures".to_string(),
            results_path: "scraping_results".to_string(),
        }
    }
}
