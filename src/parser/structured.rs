//! JSON-LD structured data extraction
//!
//! Review pages embed `<script type="application/ld+json">` blocks. Some of
//! them hold several JSON documents written back to back, which is not valid
//! JSON as a whole, so each block is parsed in two stages: whole text first,
//! then newline-separated chunks.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;
use serde_json::Value;

use crate::parser::selectors::ContentSelectors;

lazy_static! {
    // A newline followed by the start of another JSON object or array
    static ref CHUNK_BOUNDARY: Regex = Regex::new(r"\n\s*[\{\[]").expect("Invalid regex pattern");
}

/// Parse every structured-data block in the document, in document order
///
/// Never fails: blocks and chunks that do not parse are skipped.
pub fn parse_structured_data(document: &Html) -> Vec<Value> {
    let selectors = ContentSelectors::new();

    document
        .select(selectors.structured_data)
        .flat_map(|script| parse_block(&script.text().collect::<String>()))
        .collect()
}

/// Parse the text of a single structured-data block
///
/// # Examples
///
/// ```
/// use albumscrape::parser::structured::parse_block;
///
/// let items = parse_block("{\"name\": \"a\"}\n{\"name\": \"b\"}");
/// assert_eq!(items.len(), 2);
/// ```
pub fn parse_block(text: &str) -> Vec<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return vec![value];
    }

    let values: Vec<Value> = split_chunks(text)
        .into_iter()
        .filter_map(|chunk| serde_json::from_str::<Value>(chunk.trim()).ok())
        .collect();

    tracing::trace!(parsed = values.len(), "Recovered structured data from chunks");
    values
}

/// Split at every newline that begins a new JSON object or array
fn split_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;

    for boundary in CHUNK_BOUNDARY.find_iter(text) {
        chunks.push(&text[start..boundary.start()]);
        start = boundary.start();
    }
    chunks.push(&text[start..]);

    chunks
}

/// Every JSON object reachable at the top level of the parsed items
///
/// Top-level arrays and `@graph` arrays are flattened; nested properties are
/// not searched.
pub fn objects(items: &[Value]) -> Vec<&serde_json::Map<String, Value>> {
    let mut out = Vec::new();
    for item in items {
        collect_objects(item, &mut out);
    }
    out
}

fn collect_objects<'a>(value: &'a Value, out: &mut Vec<&'a serde_json::Map<String, Value>>) {
    match value {
        Value::Object(map) => {
            out.push(map);
            if let Some(Value::Array(graph)) = map.get("@graph") {
                for node in graph {
                    collect_objects(node, out);
                }
            }
        }
        Value::Array(list) => {
            for node in list {
                collect_objects(node, out);
            }
        }
        _ => {}
    }
}

/// First non-empty string value of `key` across all structured-data objects
pub fn first_string(items: &[Value], key: &str) -> Option<String> {
    objects(items)
        .into_iter()
        .find_map(|map| string_property(map, key))
}

/// Non-empty trimmed string stored under `key`
pub fn string_property(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
