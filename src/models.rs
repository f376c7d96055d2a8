// Core data structures for albumscrape

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::StorageError;

/// Fields recovered from one review page
///
/// Built in a single extraction pass and never mutated afterwards. Optional
/// fields are `Some` only when the value is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author_names: Vec<String>, // deduplicated, first occurrence wins
    pub review_body: Option<String>,
    pub info_slice_fields: Vec<String>, // deduplicated, first occurrence wins
    /// Raw publication timestamp; kept in the record but not in the text output
    pub publish_date: Option<String>,
}

impl ExtractedRecord {
    /// True when no field produced a value
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.author_names.is_empty()
            && self.review_body.is_none()
            && self.info_slice_fields.is_empty()
            && self.publish_date.is_none()
    }

    /// Number of populated fields, for progress output
    pub fn populated_fields(&self) -> usize {
        [
            self.name.is_some(),
            self.description.is_some(),
            !self.author_names.is_empty(),
            self.review_body.is_some(),
            !self.info_slice_fields.is_empty(),
            self.publish_date.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// One line of the page index: `{id} {url}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndexEntry {
    pub id: u32,
    pub url: String,
}

impl PageIndexEntry {
    pub fn new(id: u32, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }

    /// File name the page body is stored under
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.id)
    }
}

impl fmt::Display for PageIndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.url)
    }
}

impl FromStr for PageIndexEntry {
    type Err = StorageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || StorageError::InvalidIndex {
            line: 0,
            content: line.to_string(),
        };

        let (id, url) = line.trim().split_once(' ').ok_or_else(invalid)?;
        let id = id.parse::<u32>().map_err(|_| invalid())?;
        let url = url.trim();
        if url.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(id, url))
    }
}

/// Counters for one command run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub processed: usize,
    pub skipped: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let record = ExtractedRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.populated_fields(), 0);
    }

    #[test]
    fn test_populated_fields() {
        let record = ExtractedRecord {
            name: Some("Album".to_string()),
            author_names: vec!["Jane Doe".to_string()],
            ..Default::default()
        };
        assert!(!record.is_empty());
        assert_eq!(record.populated_fields(), 2);
    }

    #[test]
    fn test_index_entry_display_and_parse() {
        let entry = PageIndexEntry::new(7, "https://pitchfork.com/reviews/albums/x/");
        assert_eq!(entry.to_string(), "7 https://pitchfork.com/reviews/albums/x/");
        assert_eq!(entry.file_name(), "7.txt");

        let parsed: PageIndexEntry = "7 https://pitchfork.com/reviews/albums/x/".parse().unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_index_entry_parse_invalid() {
        assert!("no-id-here".parse::<PageIndexEntry>().is_err());
        assert!("abc https://example.com".parse::<PageIndexEntry>().is_err());
        assert!("3 ".parse::<PageIndexEntry>().is_err());
    }

    #[test]
    fn test_run_stats() {
        let mut stats = RunStats::new();
        stats.record_processed();
        stats.record_processed();
        stats.record_skipped();
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.processed, 2);
    }
}
