//! Error types for the albumscrape collaborators
//!
//! The extraction core never fails; these errors only come from the
//! network and filesystem layers around it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Server responded with status {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Status code carried by the error, if the server answered at all
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised by the on-disk page store and record writer
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in the page index file
    #[error("Invalid index line {line}: {content:?}")]
    InvalidIndex { line: usize, content: String },
}

impl StorageError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// General crawler errors
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Link pattern did not compile
    #[error("Invalid link pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
