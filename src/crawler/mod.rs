//! Web crawling functionality with rate limiting
//!
//! This module implements the two network stages of the pipeline: walking the
//! review listing for links, and downloading each review page to disk.

pub mod fetcher;
pub mod list;
pub mod url;

pub use fetcher::PageFetcher;
pub use list::{LinkCollection, ReviewListCrawler, StopReason};
pub use url::LinkExtractor;

use crate::models::PageIndexEntry;
use crate::storage::PageStore;
use crate::utils::error::{CrawlerError, FetchError};

/// Outcome of a download run
#[derive(Debug)]
pub struct DownloadReport {
    /// Pages written, in URL order
    pub entries: Vec<PageIndexEntry>,

    /// Total bytes of decoded page text written
    pub bytes: u64,

    /// URL and error that ended the run early, if any
    pub stopped_at: Option<(String, FetchError)>,
}

impl DownloadReport {
    pub fn completed(&self) -> bool {
        self.stopped_at.is_none()
    }
}

/// Download every URL in order into the page store
///
/// Pages get ids 1, 2, ... in URL order. The first failed request stops the
/// run; pages written before it are kept and indexed. The index file is
/// written in every case.
///
/// # Errors
///
/// Returns `CrawlerError::Storage` if a page or the index cannot be written
pub async fn download_pages(
    fetcher: &PageFetcher,
    urls: &[String],
    store: &PageStore,
) -> Result<DownloadReport, CrawlerError> {
    let mut entries = Vec::with_capacity(urls.len());
    let mut stopped_at = None;
    let mut bytes = 0u64;

    for (id, url) in (1u32..).zip(urls) {
        let body = match fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(id, url = %url, error = %e, "Download failed, stopping");
                stopped_at = Some((url.clone(), e));
                break;
            }
        };

        let entry = PageIndexEntry::new(id, url.as_str());
        store.write_page(&entry, &body)?;
        tracing::info!(id, url = %url, bytes = body.len(), "Saved page");
        bytes += body.len() as u64;
        entries.push(entry);
    }

    store.write_index(&entries)?;

    tracing::info!(
        saved = entries.len(),
        requested = urls.len(),
        completed = stopped_at.is_none(),
        "Completed page download"
    );

    Ok(DownloadReport {
        entries,
        bytes,
        stopped_at,
    })
}
