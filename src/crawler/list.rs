//! Review listing crawler with pagination support
//!
//! This module walks the paginated album review listing and accumulates a
//! bounded, ordered set of review URLs.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::{Config, PAGE_PLACEHOLDER};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::url::LinkExtractor;
use crate::utils::error::CrawlerError;

/// Why the listing walk ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Collected as many links as the cap allows
    CapReached,
    /// A listing page answered with a non-success status or failed to load
    FetchFailed { page: u32, status: Option<u16> },
    /// A listing page produced no links that were not already known
    NoNewLinks { page: u32 },
}

/// Per-page progress of a listing walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub page: u32,
    /// Matching links on the page
    pub found: usize,
    /// Links not seen on earlier pages
    pub new_links: usize,
}

/// Result of a listing walk
#[derive(Debug, Clone)]
pub struct LinkCollection {
    /// Review URLs in first-seen order, at most `max_links` long
    pub links: Vec<String>,
    pub pages: Vec<ListingPage>,
    pub stop: StopReason,
}

/// Review listing crawler
pub struct ReviewListCrawler {
    fetcher: PageFetcher,
    extractor: LinkExtractor,
    /// Absolute listing URL containing the page placeholder
    listing_template: String,
    max_links: usize,
    listing_timeout: Duration,
}

impl ReviewListCrawler {
    /// Create new listing crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Configured PageFetcher instance
    /// * `extractor` - Link filter for listing pages
    /// * `listing_template` - Absolute listing URL containing `{page}`
    /// * `max_links` - Maximum number of links to collect
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use albumscrape::crawler::fetcher::PageFetcher;
    /// use albumscrape::crawler::list::ReviewListCrawler;
    /// use albumscrape::crawler::url::LinkExtractor;
    ///
    /// let fetcher = PageFetcher::new(10).unwrap();
    /// let extractor = LinkExtractor::new("https://pitchfork.com", r"^/reviews/albums/[a-z0-9\-\._]+/$").unwrap();
    /// let crawler = ReviewListCrawler::new(
    ///     fetcher,
    ///     extractor,
    ///     "https://pitchfork.com/reviews/albums/?page={page}",
    ///     200,
    /// );
    /// ```
    #[must_use]
    pub fn new(
        fetcher: PageFetcher,
        extractor: LinkExtractor,
        listing_template: &str,
        max_links: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            listing_template: listing_template.to_string(),
            max_links,
            listing_timeout: Duration::from_secs(15),
        }
    }

    /// Create a crawler from the site and crawler sections of the configuration
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError` if the link pattern is invalid or the HTTP client
    /// cannot be created
    pub fn from_config(config: &Config) -> Result<Self, CrawlerError> {
        let fetcher = PageFetcher::from_config(config)?;
        let extractor = LinkExtractor::from_config(config)?;
        let template = format!(
            "{}{}",
            config.site.base_url.trim_end_matches('/'),
            config.site.listing_path
        );

        Ok(Self::new(fetcher, extractor, &template, config.site.max_links)
            .with_listing_timeout(config.listing_timeout()))
    }

    /// Override the per-request timeout used for listing pages
    #[must_use]
    pub fn with_listing_timeout(mut self, timeout: Duration) -> Self {
        self.listing_timeout = timeout;
        self
    }

    /// Listing URL for a 1-based page number
    #[must_use]
    pub fn listing_url(&self, page: u32) -> String {
        self.listing_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Walk listing pages 1, 2, ... until the cap is reached or the listing
    /// stops producing links
    ///
    /// A failing listing page ends the walk but is not an error: the links
    /// gathered so far are returned.
    pub async fn collect_links(&self) -> LinkCollection {
        let mut links: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages = Vec::new();
        let mut page = 1;

        let stop = loop {
            if links.len() >= self.max_links {
                break StopReason::CapReached;
            }

            let url = self.listing_url(page);
            tracing::debug!(page, url = %url, "Fetching listing page");

            let html = match self.fetcher.fetch_with_timeout(&url, self.listing_timeout).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(page, error = %e, "Listing page failed, stopping");
                    break StopReason::FetchFailed {
                        page,
                        status: e.status(),
                    };
                }
            };

            let found = self.extractor.extract_links(&html);
            let before = links.len();
            for link in &found {
                if seen.insert(link.clone()) {
                    links.push(link.clone());
                }
            }
            let new_links = links.len() - before;

            tracing::info!(
                page,
                found = found.len(),
                new_links,
                total = links.len(),
                "Processed listing page"
            );
            pages.push(ListingPage {
                page,
                found: found.len(),
                new_links,
            });

            if new_links == 0 {
                break StopReason::NoNewLinks { page };
            }

            page += 1;
        };

        links.truncate(self.max_links);

        tracing::info!(
            total_links = links.len(),
            pages = pages.len(),
            stop = ?stop,
            "Completed link collection"
        );

        LinkCollection { links, pages, stop }
    }
}
