//! URL handling module for page-harvest
//!
//! This module classifies user-supplied strings as well-formed, fetchable
//! absolute URLs before they enter the scraping pipeline.

mod validate;

pub use validate::is_valid_url;
