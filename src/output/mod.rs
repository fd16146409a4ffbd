//! Output module for persisting scrape results
//!
//! This module handles serializing successful scrape records to disk.
//! JSON preserves the full nested structure; CSV flattens paragraphs and
//! links into newline-joined cells, one row per record.

mod csv;
mod json;

pub use self::csv::write_csv;
pub use json::write_json;

use crate::pipeline::PageRecord;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(OutputError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Saves a single record under `<base>.<extension>`
///
/// JSON output is one object, matching the single-shot shape callers expect.
pub fn save_record(
    record: &PageRecord,
    base: &str,
    format: OutputFormat,
) -> OutputResult<PathBuf> {
    save_payload(std::slice::from_ref(record), true, base, format)
}

/// Saves a batch of records under `<base>.<extension>`
///
/// JSON output is an array, even for a batch that produced one success.
pub fn save_records(
    records: &[PageRecord],
    base: &str,
    format: OutputFormat,
) -> OutputResult<PathBuf> {
    save_payload(records, false, base, format)
}

fn save_payload(
    records: &[PageRecord],
    single: bool,
    base: &str,
    format: OutputFormat,
) -> OutputResult<PathBuf> {
    let path = PathBuf::from(format!("{}.{}", base, format.extension()));

    match format {
        OutputFormat::Json => json::write_json(records, single, &path)?,
        OutputFormat::Csv => csv::write_csv(records, &path)?,
    }

    tracing::info!("Results saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_unsupported_format_is_an_error() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
    }
}
