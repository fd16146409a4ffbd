//! JSON serialization of scrape records

use crate::output::OutputError;
use crate::pipeline::PageRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes records as pretty-printed JSON
///
/// A single record writes as one object; a batch writes as an array. The
/// full nested structure (paragraphs, links, images) is preserved.
pub fn write_json(records: &[PageRecord], single: bool, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if single && records.len() == 1 {
        serde_json::to_writer_pretty(writer, &records[0])?;
    } else {
        serde_json::to_writer_pretty(writer, records)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::LinkEntry;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_record(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            fetched_at: Utc::now(),
            title: "Sample".to_string(),
            paragraphs: vec!["one".to_string(), "two".to_string()],
            links: vec![LinkEntry {
                text: "Next".to_string(),
                href: "/next".to_string(),
            }],
            images: None,
        }
    }

    #[test]
    fn test_single_record_writes_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("single.json");

        write_json(&[sample_record("https://example.com")], true, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.is_object());
        assert_eq!(value["url"], "https://example.com");
    }

    #[test]
    fn test_batch_writes_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.json");

        let records = vec![
            sample_record("https://example.com/a"),
            sample_record("https://example.com/b"),
        ];
        write_json(&records, false, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.json");

        let record = sample_record("https://example.com/post");
        write_json(std::slice::from_ref(&record), true, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: PageRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(record, parsed);
    }
}
