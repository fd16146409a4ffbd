//! Selector-driven content extraction
//!
//! Given a fetched page body and a selector configuration, produces the
//! structured record fields: title, paragraphs, and links. Extraction is
//! fully synchronous; the parsed document never crosses an await point.

use crate::pipeline::records::LinkEntry;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

/// Maximum number of paragraph elements captured per page
pub const MAX_PARAGRAPHS: usize = 5;

/// Maximum number of link elements captured per page
pub const MAX_LINKS: usize = 10;

/// Placeholder title used when no element matches the title selector
pub const TITLE_FALLBACK: &str = "Title not found";

/// CSS selector configuration for a scrape request
///
/// Defaults (`title`/`p`/`a`) apply only when a request carries no selector
/// configuration at all. A supplied configuration with a missing field
/// leaves that field unselected; it is never filled from the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Selector for the page title
    pub title: Option<String>,

    /// Selector for paragraph elements
    pub paragraphs: Option<String>,

    /// Selector for link elements
    pub links: Option<String>,

    /// Keys the extractor does not understand, preserved for callers
    pub extra: BTreeMap<String, String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: Some("title".to_string()),
            paragraphs: Some("p".to_string()),
            links: Some("a".to_string()),
            extra: BTreeMap::new(),
        }
    }
}

impl SelectorConfig {
    /// An entirely empty configuration, selecting nothing
    pub fn empty() -> Self {
        Self {
            title: None,
            paragraphs: None,
            links: None,
            extra: BTreeMap::new(),
        }
    }

    /// Parses the CLI selector syntax `key=value,key=value`
    ///
    /// Recognized keys are `title`, `paragraphs`, and `links`; anything else
    /// lands in `extra`. Returns `None` for an empty or malformed spec, in
    /// which case callers fall back to default behavior.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_harvest::SelectorConfig;
    ///
    /// let config = SelectorConfig::from_key_value_spec("title=h1,links=nav a").unwrap();
    /// assert_eq!(config.title.as_deref(), Some("h1"));
    /// assert_eq!(config.paragraphs, None);
    /// ```
    pub fn from_key_value_spec(spec: &str) -> Option<Self> {
        if spec.trim().is_empty() {
            return None;
        }

        let mut config = Self::empty();
        for item in spec.split(',') {
            let (key, value) = item.split_once('=')?;
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                return None;
            }

            match key {
                "title" => config.title = Some(value.to_string()),
                "paragraphs" => config.paragraphs = Some(value.to_string()),
                "links" => config.links = Some(value.to_string()),
                _ => {
                    config.extra.insert(key.to_string(), value.to_string());
                }
            }
        }

        Some(config)
    }
}

/// Structured content pulled out of one page
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// Title text, or the placeholder when nothing matched
    pub title: String,

    /// Up to [`MAX_PARAGRAPHS`] paragraph texts, trimmed, in document order
    pub paragraphs: Vec<String>,

    /// Up to [`MAX_LINKS`] href-bearing links, in document order
    pub links: Vec<LinkEntry>,

    /// src attribute of every img element, in document order
    pub image_sources: Vec<String>,
}

/// Extracts structured content from an HTML body
///
/// A selector that is absent, fails to parse, or matches nothing yields the
/// empty (or placeholder) value for its field; nothing escapes this boundary.
pub fn extract(body: &str, selectors: &SelectorConfig) -> ExtractedContent {
    let document = Html::parse_document(body);

    let title = extract_title(&document, selectors.title.as_deref());
    let paragraphs = extract_paragraphs(&document, selectors.paragraphs.as_deref());
    let links = extract_links(&document, selectors.links.as_deref());
    let image_sources = collect_image_sources(&document);

    ExtractedContent {
        title,
        paragraphs,
        links,
        image_sources,
    }
}

/// Resolves the title selector: first match's text, or the placeholder
fn extract_title(document: &Html, selector: Option<&str>) -> String {
    selector
        .and_then(|expr| Selector::parse(expr).ok())
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_else(|| TITLE_FALLBACK.to_string())
}

/// Resolves the paragraphs selector: first few matches, trimmed
fn extract_paragraphs(document: &Html, selector: Option<&str>) -> Vec<String> {
    selector
        .and_then(|expr| Selector::parse(expr).ok())
        .map(|sel| {
            document
                .select(&sel)
                .take(MAX_PARAGRAPHS)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves the links selector: href-bearing matches only, capped
fn extract_links(document: &Html, selector: Option<&str>) -> Vec<LinkEntry> {
    selector
        .and_then(|expr| Selector::parse(expr).ok())
        .map(|sel| {
            document
                .select(&sel)
                .filter_map(|el| {
                    el.value().attr("href").map(|href| LinkEntry {
                        text: el.text().collect::<String>().trim().to_string(),
                        href: href.to_string(),
                    })
                })
                .take(MAX_LINKS)
                .collect()
        })
        .unwrap_or_default()
}

/// Collects the src attribute of every img element, in document order
///
/// Values are passed through as-is; the image downloader decides what is
/// resolvable and skips empty entries.
fn collect_image_sources(document: &Html) -> Vec<String> {
    let Ok(sel) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .filter_map(|el| el.value().attr("src"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html>
        <head><title>  Sample Page  </title></head>
        <body>
            <h1>Headline</h1>
            <p> first </p>
            <p>second</p>
            <p>third</p>
            <a href="/one">One</a>
            <a href="/two"> Two </a>
            <a>No href</a>
            <img src="/a.png" />
            <img src="" />
            <img alt="no src" />
        </body>
        </html>
    "#;

    #[test]
    fn test_default_selectors() {
        let content = extract(SAMPLE, &SelectorConfig::default());
        assert_eq!(content.title, "Sample Page");
        assert_eq!(content.paragraphs, vec!["first", "second", "third"]);
        assert_eq!(content.links.len(), 2);
        assert_eq!(content.links[0].text, "One");
        assert_eq!(content.links[0].href, "/one");
        assert_eq!(content.links[1].text, "Two");
    }

    #[test]
    fn test_fewer_paragraphs_than_cap() {
        let content = extract(SAMPLE, &SelectorConfig::default());
        assert_eq!(content.paragraphs.len(), 3);
    }

    #[test]
    fn test_paragraph_cap() {
        let body: String = (0..20).map(|i| format!("<p>para {}</p>", i)).collect();
        let content = extract(&body, &SelectorConfig::default());
        assert_eq!(content.paragraphs.len(), MAX_PARAGRAPHS);
        assert_eq!(content.paragraphs[0], "para 0");
        assert_eq!(content.paragraphs[4], "para 4");
    }

    #[test]
    fn test_link_cap_with_many_anchors() {
        let body: String = (0..50)
            .map(|i| format!("<a href=\"/p{}\">link {}</a>", i, i))
            .collect();
        let content = extract(&body, &SelectorConfig::default());
        assert_eq!(content.links.len(), MAX_LINKS);
        assert_eq!(content.links[9].href, "/p9");
    }

    #[test]
    fn test_hrefless_anchors_do_not_count_against_cap() {
        let mut body = String::new();
        for _ in 0..10 {
            body.push_str("<a>no href</a>");
        }
        body.push_str("<a href=\"/kept\">kept</a>");

        let content = extract(&body, &SelectorConfig::default());
        assert_eq!(content.links.len(), 1);
        assert_eq!(content.links[0].href, "/kept");
    }

    #[test]
    fn test_title_fallback_when_absent() {
        let content = extract("<html><body><p>text</p></body></html>", &SelectorConfig::default());
        assert_eq!(content.title, TITLE_FALLBACK);
    }

    #[test]
    fn test_invalid_selector_yields_fallback_not_error() {
        let config = SelectorConfig {
            title: Some("[[[".to_string()),
            paragraphs: Some("???".to_string()),
            links: None,
            extra: BTreeMap::new(),
        };
        let content = extract(SAMPLE, &config);
        assert_eq!(content.title, TITLE_FALLBACK);
        assert!(content.paragraphs.is_empty());
        assert!(content.links.is_empty());
    }

    #[test]
    fn test_supplied_config_does_not_fall_back_per_field() {
        // Only the title key is set; paragraphs and links stay unselected
        // even though matching elements exist.
        let config = SelectorConfig::from_key_value_spec("title=h1").unwrap();
        let content = extract(SAMPLE, &config);
        assert_eq!(content.title, "Headline");
        assert!(content.paragraphs.is_empty());
        assert!(content.links.is_empty());
    }

    #[test]
    fn test_image_sources_collected_in_order() {
        let content = extract(SAMPLE, &SelectorConfig::default());
        assert_eq!(content.image_sources, vec!["/a.png", ""]);
    }

    #[test]
    fn test_spec_parsing_with_spaces() {
        let config =
            SelectorConfig::from_key_value_spec("title=h1.main, paragraphs=div.content p").unwrap();
        assert_eq!(config.title.as_deref(), Some("h1.main"));
        assert_eq!(config.paragraphs.as_deref(), Some("div.content p"));
        assert_eq!(config.links, None);
    }

    #[test]
    fn test_spec_unknown_keys_preserved() {
        let config = SelectorConfig::from_key_value_spec("title=h1,headings=h2").unwrap();
        assert_eq!(config.extra.get("headings").map(String::as_str), Some("h2"));

        // Unknown keys are ignored by extraction itself.
        let content = extract(SAMPLE, &config);
        assert_eq!(content.title, "Headline");
    }

    #[test]
    fn test_malformed_spec_is_none() {
        assert!(SelectorConfig::from_key_value_spec("").is_none());
        assert!(SelectorConfig::from_key_value_spec("   ").is_none());
        assert!(SelectorConfig::from_key_value_spec("title").is_none());
        assert!(SelectorConfig::from_key_value_spec("title=h1,broken").is_none());
        assert!(SelectorConfig::from_key_value_spec("=h1").is_none());
        assert!(SelectorConfig::from_key_value_spec("title=").is_none());
    }
}
