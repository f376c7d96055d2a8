//! HTML parsing and data extraction
//!
//! This module parses saved album review pages and recovers the review
//! fields with layered fallback heuristics.

pub mod authors;
pub mod html;
pub mod sanitize;
pub mod selectors;
pub mod structured;

// Re-export main extractor and public types
pub use crate::models::ExtractedRecord;
pub use html::{Heuristic, Page, ReviewExtractor};

/// Extract a review record from raw page markup
///
/// Convenience wrapper around [`ReviewExtractor::extract`].
///
/// # Examples
///
/// ```
/// let record = albumscrape::parser::extract(
///     r#"<html><head><meta property="og:title" content="Blue Hour"></head></html>"#,
/// );
/// assert_eq!(record.name.as_deref(), Some("Blue Hour"));
/// ```
pub fn extract(raw: &str) -> ExtractedRecord {
    ReviewExtractor::new().extract(raw)
}
