//! File storage for the scrape pipeline
//!
//! Three artifacts live on disk: the collected URL list, the directory of
//! raw pages with its index, and the directory of extracted text records.

pub mod pages;
pub mod record;

pub use pages::PageStore;
pub use record::{render_record, RecordWriter};

use std::fs;
use std::path::Path;

use crate::utils::error::StorageError;

/// Write URLs one per line, each followed by a newline
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be written
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let content: String = urls.iter().map(|url| format!("{url}\n")).collect();
    fs::write(path, content).map_err(|e| StorageError::io(path, e))
}

/// Read URLs back, trimming each line and skipping empty ones
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read
pub fn read_url_list(path: &Path) -> Result<Vec<String>, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
