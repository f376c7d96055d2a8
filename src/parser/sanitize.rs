//! Text helpers for turning parsed elements into clean strings
//!
//! Every extraction heuristic funnels its output through these functions so
//! that whitespace handling is identical across fields.

use scraper::ElementRef;
use std::collections::HashSet;

use crate::utils::normalize_whitespace;

/// Collapse runs of whitespace to single spaces and trim
///
/// # Examples
///
/// ```
/// use albumscrape::parser::sanitize::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Jane \n\t Doe "), "Jane Doe");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    normalize_whitespace(text)
}

/// Trimmed value, or `None` if nothing but whitespace remains
///
/// # Examples
///
/// ```
/// use albumscrape::parser::sanitize::non_empty;
///
/// assert_eq!(non_empty("  x ").as_deref(), Some("x"));
/// assert_eq!(non_empty(" \n "), None);
/// ```
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// All text under an element, whitespace collapsed
pub fn collapsed_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Text nodes under an element, each trimmed, empties dropped, joined by `separator`
pub fn stripped_text(element: &ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Text of an element with one line per text node
pub fn multiline_text(element: &ElementRef<'_>) -> String {
    stripped_text(element, "\n")
}

/// Normalize every entry and drop empties and repeats, keeping first occurrences
///
/// # Examples
///
/// ```
/// use albumscrape::parser::sanitize::dedupe_normalized;
///
/// let names = vec![
///     "Jane  Doe".to_string(),
///     "John Smith".to_string(),
///     " Jane Doe".to_string(),
///     "".to_string(),
/// ];
/// assert_eq!(dedupe_normalized(names), vec!["Jane Doe", "John Smith"]);
/// ```
pub fn dedupe_normalized<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| collapse_whitespace(&item))
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
