//! Author name collection
//!
//! Unlike the other fields, authors are gathered from every source and merged:
//! meta tags, JSON-LD, microdata, rel/class hints, known byline selectors and
//! free-text "By ..." lines. The merged list is normalized and deduplicated
//! with the first occurrence kept.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html};
use serde_json::Value;

use crate::parser::html::{Page, ReviewExtractor};
use crate::parser::sanitize::{collapsed_text, dedupe_normalized, non_empty};
use crate::parser::structured::objects;

/// Longest text considered a byline candidate, in characters
const MAX_BYLINE_CHARS: usize = 200;

/// Class substrings that mark author-ish elements (matched lowercase)
const AUTHOR_CLASS_HINTS: &[&str] = &["author", "byline", "contributor"];

lazy_static! {
    static ref META_SEPARATOR: Regex =
        Regex::new(r"\s*[;,/]\s*|\s+and\s+").expect("Invalid regex pattern");
    static ref ENGLISH_BYLINE: Regex =
        Regex::new(r"^(?:By|by)\s+([A-Z][\w.\-]*(?:\s+[\w.\-]+)*)$").expect("Invalid regex pattern");
    static ref CYRILLIC_BYLINE: Regex =
        Regex::new(r"(?i)^Автор\s*[:\-]\s*(.+)$").expect("Invalid regex pattern");
}

/// Collect author names from every source, normalized and deduplicated
pub(crate) fn collect(extractor: &ReviewExtractor, page: &Page) -> Vec<String> {
    let mut names = Vec::new();

    names.extend(from_meta(extractor, &page.document));
    names.extend(from_structured_data(&page.structured));
    names.extend(from_itemprop(extractor, &page.document));
    names.extend(from_rel_and_class(&page.document));
    names.extend(from_byline_selectors(extractor, &page.document));
    names.extend(from_byline_text(extractor, &page.document));

    tracing::trace!(candidates = names.len(), "Collected author candidates");
    dedupe_normalized(names)
}

/// Split a meta author value into individual names
///
/// # Examples
///
/// ```
/// use albumscrape::parser::authors::split_author_list;
///
/// assert_eq!(
///     split_author_list("Jane Doe; John Smith and Ann Lee/Bo Kim"),
///     vec!["Jane Doe", "John Smith", "Ann Lee", "Bo Kim"]
/// );
/// ```
pub fn split_author_list(value: &str) -> Vec<String> {
    META_SEPARATOR
        .split(value)
        .filter_map(non_empty)
        .collect()
}

/// Name captured from a short byline such as `By Jane A. Doe` or `Автор: ...`
///
/// # Examples
///
/// ```
/// use albumscrape::parser::authors::byline_name;
///
/// assert_eq!(byline_name("By Jane A. Doe").as_deref(), Some("Jane A. Doe"));
/// assert_eq!(byline_name("by jane doe"), None);
/// ```
pub fn byline_name(text: &str) -> Option<String> {
    if text.chars().count() > MAX_BYLINE_CHARS {
        return None;
    }

    ENGLISH_BYLINE
        .captures(text)
        .or_else(|| CYRILLIC_BYLINE.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

fn from_meta(extractor: &ReviewExtractor, document: &Html) -> Vec<String> {
    extractor
        .meta_content(document, extractor.meta.author)
        .map(|value| split_author_list(&value))
        .unwrap_or_default()
}

fn from_structured_data(items: &[Value]) -> Vec<String> {
    let mut names = Vec::new();

    for item in objects(items) {
        match item.get("author") {
            Some(Value::String(name)) => names.push(name.clone()),
            Some(Value::Object(author)) => names.extend(person_name(author)),
            Some(Value::Array(authors)) => {
                for author in authors {
                    match author {
                        Value::String(name) => names.push(name.clone()),
                        Value::Object(author) => names.extend(person_name(author)),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    names
}

/// `name` of a JSON-LD person object, else its nested `author` string
fn person_name(author: &serde_json::Map<String, Value>) -> Option<String> {
    author
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| author.get("author").and_then(Value::as_str))
        .map(str::to_string)
}

fn from_itemprop(extractor: &ReviewExtractor, document: &Html) -> Vec<String> {
    document
        .select(extractor.authors.itemprop)
        .map(|element| collapsed_text(&element))
        .collect()
}

fn from_rel_and_class(document: &Html) -> Vec<String> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| has_author_rel(element) || has_author_class(element))
        .map(|element| collapsed_text(&element))
        .collect()
}

fn has_author_rel(element: &ElementRef<'_>) -> bool {
    element.value().attr("rel").is_some_and(|rel| {
        rel.split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("author"))
    })
}

fn has_author_class(element: &ElementRef<'_>) -> bool {
    element.value().attr("class").is_some_and(|class| {
        let class = class.to_lowercase();
        AUTHOR_CLASS_HINTS.iter().any(|hint| class.contains(hint))
    })
}

fn from_byline_selectors(extractor: &ReviewExtractor, document: &Html) -> Vec<String> {
    extractor
        .authors
        .classes
        .iter()
        .flat_map(|selector| document.select(selector))
        .map(|element| collapsed_text(&element))
        .collect()
}

fn from_byline_text(extractor: &ReviewExtractor, document: &Html) -> Vec<String> {
    document
        .select(extractor.authors.byline_candidates)
        .filter_map(|element| byline_name(&collapsed_text(&element)))
        .collect()
}
