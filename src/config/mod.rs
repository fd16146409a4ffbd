//! Configuration module for page-harvest
//!
//! This module handles loading, parsing, and validating optional TOML
//! configuration files. Every setting has a default, so the tool runs
//! without any configuration file at all.
//!
//! # Example
//!
//! ```no_run
//! use page_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Worker pool width: {}", config.scraper.max_concurrent_requests);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, ScraperConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
