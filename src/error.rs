//! Unified error handling for the albumscrape crate
//!
//! Domain-specific errors live in [`crate::utils::error`]. Library stages that
//! touch more than one collaborator return the [`Error`] defined here; the
//! commands wrap everything in `anyhow`.

use thiserror::Error;

pub use crate::utils::error::{CrawlerError, FetchError, StorageError};

/// Unified error type for the albumscrape crate
#[derive(Error, Debug)]
pub enum Error {
    /// Page store and record writer errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
