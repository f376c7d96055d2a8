//! Flat text rendering of extracted records
//!
//! Layout, with every value trimmed:
//!
//! ```text
//! {name}
//!
//! {description}
//!
//! {author_1}
//! ...
//!
//! {info_1}
//! ...
//!
//! {body}
//! ```
//!
//! Missing values render as empty strings and the body has no trailing
//! newline. The publish date is not part of the layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ExtractedRecord;
use crate::utils::error::StorageError;

/// Render a record into the flat text layout
///
/// # Examples
///
/// ```
/// use albumscrape::models::ExtractedRecord;
/// use albumscrape::storage::render_record;
///
/// let record = ExtractedRecord {
///     name: Some("Blue Hour".to_string()),
///     author_names: vec!["Jane Doe".to_string()],
///     review_body: Some("First.\n\nSecond.".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(
///     render_record(&record),
///     "Blue Hour\n\n\n\nJane Doe\n\n\nFirst.\n\nSecond."
/// );
/// ```
pub fn render_record(record: &ExtractedRecord) -> String {
    let mut out = String::new();

    out.push_str(trimmed(&record.name));
    out.push_str("\n\n");
    out.push_str(trimmed(&record.description));
    out.push_str("\n\n");

    for author in &record.author_names {
        out.push_str(author.trim());
        out.push('\n');
    }
    out.push('\n');

    for info in &record.info_slice_fields {
        out.push_str(info.trim());
        out.push('\n');
    }
    out.push('\n');

    out.push_str(trimmed(&record.review_body));
    out
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

/// Writes rendered records into an output directory
pub struct RecordWriter {
    output_dir: PathBuf,
}

impl RecordWriter {
    /// Create a new writer, creating the output directory if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created
    pub fn new(output_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(output_dir).map_err(|e| StorageError::io(output_dir, e))?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Directory records are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save a record as `{stem}.txt`
    ///
    /// # Returns
    /// Path to saved file
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be written
    pub fn write(&self, stem: &str, record: &ExtractedRecord) -> Result<PathBuf, StorageError> {
        let path = self.output_dir.join(format!("{stem}.txt"));
        fs::write(&path, render_record(record)).map_err(|e| StorageError::io(&path, e))?;

        tracing::debug!(path = %path.display(), "Saved record");
        Ok(path)
    }
}
