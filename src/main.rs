//! page-harvest main entry point
//!
//! This is the command-line interface for the page-harvest web scraper.

use anyhow::Context;
use clap::Parser;
use page_harvest::config::{load_config_with_hash, Config};
use page_harvest::output::{save_record, save_records, OutputFormat};
use page_harvest::pipeline::{
    scrape_many, scrape_one, ScrapeOutcome, ScrapeRequest, SelectorConfig,
};
use page_harvest::url::is_valid_url;
use page_harvest::HarvestError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// page-harvest: a concurrent web content scraper
///
/// Fetches one or more pages, extracts title, paragraphs, and links via CSS
/// selectors, optionally downloads embedded images, and saves the results
/// as JSON or CSV.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent web content scraper", long_about = None)]
struct Cli {
    /// URL to scrape (single-shot mode)
    #[arg(value_name = "URL", required_unless_present = "urls")]
    url: Option<String>,

    /// Scrape multiple URLs concurrently
    #[arg(short, long, num_args = 1.., conflicts_with = "url")]
    urls: Vec<String>,

    /// Download images embedded in each page
    #[arg(short = 'p', long)]
    pictures: bool,

    /// Custom CSS selectors, e.g. "title=h1,paragraphs=div.content p"
    #[arg(short, long, value_name = "SPEC")]
    selector: Option<String>,

    /// Proxy endpoint for both HTTP and HTTPS traffic
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Output file name, without extension
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or run entirely on defaults
    let config = match &cli.config {
        Some(path) => {
            let (config, hash) =
                load_config_with_hash(path).context("failed to load configuration")?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    let format: OutputFormat = cli
        .format
        .parse()
        .context("unsupported output format, expected json or csv")?;

    // An invalid proxy is dropped with a warning rather than aborting the run
    let proxy = match cli.proxy {
        Some(endpoint) if !is_valid_url(&endpoint) => {
            tracing::warn!("Invalid proxy URL format, continuing without proxy");
            None
        }
        other => other,
    };

    // A malformed selector spec falls back to the default selectors
    let selectors = cli.selector.as_deref().and_then(|spec| {
        let parsed = SelectorConfig::from_key_value_spec(spec);
        if parsed.is_none() {
            tracing::warn!("Malformed selector spec '{}', using defaults", spec);
        }
        parsed
    });

    let output_base = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output.results_path.clone());

    if !cli.urls.is_empty() {
        run_batch(
            cli.urls,
            selectors,
            proxy,
            cli.pictures,
            &config,
            format,
            &output_base,
        )
        .await
    } else if let Some(url) = cli.url {
        run_single(
            url,
            selectors,
            proxy,
            cli.pictures,
            &config,
            format,
            &output_base,
        )
        .await
    } else {
        // clap enforces that one of url/urls is present
        anyhow::bail!("no URL supplied")
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles single-shot mode: one URL, failure exits non-zero
async fn run_single(
    url: String,
    selectors: Option<SelectorConfig>,
    proxy: Option<String>,
    pictures: bool,
    config: &Config,
    format: OutputFormat,
    output_base: &str,
) -> anyhow::Result<()> {
    if !is_valid_url(&url) {
        return Err(HarvestError::InvalidUrl(url).into());
    }

    let request = build_request(url, &selectors, &proxy, pictures);

    match scrape_one(request, config).await {
        ScrapeOutcome::Success(record) => {
            println!("Title: {}", record.title);
            println!("Paragraphs: {}", record.paragraphs.len());
            println!("Links: {}", record.links.len());
            if let Some(images) = &record.images {
                println!("Images saved: {}", images.len());
            }

            save_record(&record, output_base, format).context("failed to save results")?;
            Ok(())
        }
        ScrapeOutcome::Failure(failed) => {
            anyhow::bail!("scrape failed ({:?}): {}", failed.kind, failed.message)
        }
    }
}

/// Handles batch mode: invalid URLs are skipped up front, scrape failures
/// are logged and dropped, and the run only fails when nothing was valid
async fn run_batch(
    urls: Vec<String>,
    selectors: Option<SelectorConfig>,
    proxy: Option<String>,
    pictures: bool,
    config: &Config,
    format: OutputFormat,
    output_base: &str,
) -> anyhow::Result<()> {
    let mut valid: Vec<String> = Vec::new();
    for url in urls {
        if !is_valid_url(&url) {
            tracing::warn!("Skipping invalid URL: {}", url);
            continue;
        }
        if valid.contains(&url) {
            tracing::debug!("Skipping duplicate URL: {}", url);
            continue;
        }
        valid.push(url);
    }

    if valid.is_empty() {
        anyhow::bail!("no valid URL supplied");
    }

    let total = valid.len();
    let requests: Vec<ScrapeRequest> = valid
        .into_iter()
        .map(|url| build_request(url, &selectors, &proxy, pictures))
        .collect();

    let records = scrape_many(requests, config).await;
    println!("Scraped {} of {} URLs.", records.len(), total);

    save_records(&records, output_base, format).context("failed to save results")?;
    Ok(())
}

/// Builds a scrape request from the shared CLI options
fn build_request(
    url: String,
    selectors: &Option<SelectorConfig>,
    proxy: &Option<String>,
    pictures: bool,
) -> ScrapeRequest {
    let mut request = ScrapeRequest::new(url).with_images(pictures);
    if let Some(selectors) = selectors {
        request = request.with_selectors(selectors.clone());
    }
    if let Some(proxy) = proxy {
        request = request.with_proxy(proxy.clone());
    }
    request
}
