//! Embedded image retrieval
//!
//! Resolves img src references against the page URL, fetches each image, and
//! persists it under a sanitized filename. Individual failures are absorbed
//! here: a failed image is dropped from the outcome sequence and reported via
//! logging only, never as an error for the owning page.

use crate::pipeline::records::SavedImage;
use chrono::Utc;
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Per-image failure, absorbed at this boundary
#[derive(Debug, Error)]
enum AssetFetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads the images referenced by a page
///
/// Each src is resolved against `page_url`; empty srcs and references that do
/// not resolve to http/https (data URIs, for instance) are skipped silently.
/// Images are fetched sequentially in source order. An individual failure is
/// logged and excluded from the returned sequence; the batch never aborts.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page_url` - The page the srcs were found on, for relative resolution
/// * `sources` - Raw src attribute values, in document order
/// * `target_dir` - Directory to store images in; created if absent
pub async fn download_images(
    client: &Client,
    page_url: &Url,
    sources: &[String],
    target_dir: &Path,
) -> Vec<SavedImage> {
    let mut saved = Vec::new();

    // Idempotent: succeeds whether or not the directory already exists,
    // including when a sibling task created it first.
    if let Err(e) = tokio::fs::create_dir_all(target_dir).await {
        tracing::warn!(
            "Failed to create image directory {}: {}",
            target_dir.display(),
            e
        );
        return saved;
    }

    for src in sources {
        if src.trim().is_empty() {
            continue;
        }

        let image_url = match page_url.join(src) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable image src {}: {}", src, e);
                continue;
            }
        };

        if image_url.scheme() != "http" && image_url.scheme() != "https" {
            tracing::debug!("Skipping non-http image src {}", src);
            continue;
        }

        match fetch_and_store(client, &image_url, target_dir).await {
            Ok(saved_path) => {
                tracing::debug!("Saved image {} to {}", image_url, saved_path.display());
                saved.push(SavedImage {
                    original_url: image_url.to_string(),
                    saved_path,
                });
            }
            Err(e) => {
                tracing::warn!("Image download failed for {}: {}", image_url, e);
            }
        }
    }

    saved
}

/// Fetches one image and writes it into the target directory
async fn fetch_and_store(
    client: &Client,
    image_url: &Url,
    target_dir: &Path,
) -> Result<PathBuf, AssetFetchError> {
    let response = client.get(image_url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AssetFetchError::Status(status));
    }

    let bytes = response.bytes().await?;

    let path = target_dir.join(image_filename(image_url));
    tokio::fs::write(&path, &bytes).await?;

    Ok(path)
}

/// Derives a filesystem-safe filename from an image URL
///
/// Takes the last path segment and strips characters outside
/// `[A-Za-z0-9_.-]`; an empty result synthesizes `image_<unix-timestamp>.jpg`.
fn image_filename(image_url: &Url) -> String {
    let segment = image_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let sanitized: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    if sanitized.is_empty() {
        format!("image_{}.jpg", Utc::now().timestamp())
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_path_segment() {
        let url = Url::parse("https://example.com/images/photo.jpg").unwrap();
        assert_eq!(image_filename(&url), "photo.jpg");
    }

    #[test]
    fn test_filename_strips_unsafe_characters() {
        let url = Url::parse("https://example.com/img/ph%20oto(1).png?v=2").unwrap();
        assert_eq!(image_filename(&url), "ph20oto1.png");
    }

    #[test]
    fn test_filename_keeps_safe_punctuation() {
        let url = Url::parse("https://example.com/a/b/shot_2-final.v1.webp").unwrap();
        assert_eq!(image_filename(&url), "shot_2-final.v1.webp");
    }

    #[test]
    fn test_empty_segment_synthesizes_name() {
        let url = Url::parse("https://example.com/").unwrap();
        let name = image_filename(&url);
        assert!(name.starts_with("image_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_all_unsafe_segment_synthesizes_name() {
        let url = Url::parse("https://example.com/%C3%BC%C3%A7/").unwrap();
        let name = image_filename(&url);
        assert!(name.starts_with("image_"));
        assert!(name.ends_with(".jpg"));
    }
}
