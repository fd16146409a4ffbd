use crate::config::types::{Config, HttpConfig, OutputConfig, ScraperConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraping behavior configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "request_delay_ms must be <= 60000ms, got {}ms",
            config.request_delay_ms
        )));
    }

    if let Some(timeout) = config.request_timeout_secs {
        if timeout < 1 {
            return Err(ConfigError::Validation(format!(
                "request_timeout_secs must be >= 1 when set, got {}",
                timeout
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be blank when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.images_dir.is_empty() {
        return Err(ConfigError::Validation(
            "images_dir cannot be empty".to_string(),
        ));
    }

    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
