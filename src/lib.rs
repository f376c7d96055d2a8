//! albumscrape - Album review scraper and field extractor
//!
//! Downloads album review pages and recovers their semantic fields (title,
//! description, authors, body text and info slices) with layered fallback
//! heuristics.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Listing walk and page download with rate limiting
//! - [`parser`] - HTML parsing and field extraction
//! - [`models`] - Core data structures and types
//! - [`storage`] - Page store, URL list and record files
//! - [`pipeline`] - Batch extraction over downloaded pages
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```
//! let html = r#"<html><head>
//!     <meta property="og:title" content="Blue Hour">
//!     <meta name="author" content="Jane Doe">
//! </head><body><article><p>First.</p><p>Second.</p></article></body></html>"#;
//!
//! let record = albumscrape::parser::extract(html);
//! assert_eq!(record.name.as_deref(), Some("Blue Hour"));
//! assert_eq!(record.author_names, vec!["Jane Doe"]);
//! assert_eq!(record.review_body.as_deref(), Some("First.\n\nSecond."));
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{PageFetcher, ReviewListCrawler};
    pub use crate::error::{Error, Result};
    pub use crate::models::{ExtractedRecord, PageIndexEntry, RunStats};
    pub use crate::parser::ReviewExtractor;
    pub use crate::pipeline::CleanPipeline;
    pub use crate::storage::{PageStore, RecordWriter};
}

// Direct re-exports for convenience
pub use models::{ExtractedRecord, PageIndexEntry};
pub use parser::extract;
