//! Review link extraction from listing pages
//!
//! Listing pages link to reviews with site-relative hrefs such as
//! `/reviews/albums/some-album/`. Only hrefs matching the configured pattern
//! are kept, and each is turned into an absolute URL by prefixing the base URL.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;

use crate::config::Config;
use crate::utils::error::CrawlerError;

lazy_static! {
    static ref ANCHOR: Selector =
        Selector::parse("a[href]").expect("Invalid CSS selector: a[href]");
}

/// Review link extractor for listing pages
pub struct LinkExtractor {
    /// Site root prepended to matching hrefs
    base_url: String,
    /// Pattern a raw href must match
    pattern: Regex,
}

impl LinkExtractor {
    /// Create a new link extractor
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError::InvalidPattern` if `pattern` is not a valid regex
    ///
    /// # Examples
    ///
    /// ```
    /// use albumscrape::crawler::url::LinkExtractor;
    ///
    /// let extractor = LinkExtractor::new("https://example.com", r"^/reviews/albums/[a-z0-9\-\._]+/$").unwrap();
    /// let html = r#"<a href="/reviews/albums/blue-hour/">Review</a><a href="/about/">About</a>"#;
    /// assert_eq!(
    ///     extractor.extract_links(html),
    ///     vec!["https://example.com/reviews/albums/blue-hour/"]
    /// );
    /// ```
    pub fn new(base_url: &str, pattern: &str) -> Result<Self, CrawlerError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Create an extractor from the site section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError::InvalidPattern` if the configured pattern is invalid
    pub fn from_config(config: &Config) -> Result<Self, CrawlerError> {
        Self::new(&config.site.base_url, &config.site.link_pattern)
    }

    /// Extract absolute review URLs from listing page HTML
    ///
    /// Returns matching links in document order with duplicates removed.
    pub fn extract_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();

        document
            .select(&ANCHOR)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter(|href| self.is_review_path(href))
            .map(|href| self.absolute(href))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Whether a raw href has the shape of a review link
    pub fn is_review_path(&self, href: &str) -> bool {
        self.pattern.is_match(href)
    }

    /// Prefix a site-relative path with the base URL
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
