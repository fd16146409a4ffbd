//! CSV serialization of scrape records
//!
//! Each record becomes one row; paragraphs and links collapse into
//! newline-joined cells. The image list is not part of the flat shape.

use crate::output::OutputError;
use crate::pipeline::PageRecord;
use csv::Writer;
use std::path::Path;

/// Column header, mirroring the record's field order
const HEADERS: [&str; 5] = ["url", "fetched_at", "title", "paragraphs", "links"];

/// Writes records as CSV, one row per record
pub fn write_csv(records: &[PageRecord], path: &Path) -> Result<(), OutputError> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(HEADERS)?;

    for record in records {
        let paragraphs = record.paragraphs.join("\n");
        let links = record
            .links
            .iter()
            .map(|link| format!("{} ({})", link.text, link.href))
            .collect::<Vec<_>>()
            .join("\n");

        let fetched_at = record.fetched_at.to_rfc3339();
        writer.write_record([
            record.url.as_str(),
            fetched_at.as_str(),
            record.title.as_str(),
            paragraphs.as_str(),
            links.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
