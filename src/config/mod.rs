//! Configuration management for albumscrape
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder replaced by the page number in `SiteConfig::listing_path`
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target site configuration
    pub site: SiteConfig,

    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Output file layout
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Target site and link discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root, prepended to discovered review paths
    pub base_url: String,

    /// Listing path template containing `{page}`
    pub listing_path: String,

    /// Regex a listing href must match to count as a review link
    pub link_pattern: String,

    /// Maximum number of review links to collect
    pub max_links: usize,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Review page request timeout in seconds
    pub request_timeout_secs: u64,

    /// Listing page request timeout in seconds
    pub listing_timeout_secs: u64,

    /// Rate limit (requests per second)
    pub requests_per_second: u32,

    /// User agent string
    pub user_agent: String,
}

/// File and directory layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Collected review URLs, one per line
    pub urls_file: PathBuf,

    /// Directory for raw downloaded pages
    pub pages_dir: PathBuf,

    /// Index file name inside `pages_dir`
    pub index_file: String,

    /// Directory for extracted text records
    pub cleaned_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables keep their default value.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = env_string("ALBUMSCRAPE_BASE_URL") {
            config.site.base_url = base_url;
        }
        if let Some(listing_path) = env_string("ALBUMSCRAPE_LISTING_PATH") {
            config.site.listing_path = listing_path;
        }
        if let Some(link_pattern) = env_string("ALBUMSCRAPE_LINK_PATTERN") {
            config.site.link_pattern = link_pattern;
        }
        if let Some(max_links) = env_parse("ALBUMSCRAPE_MAX_LINKS") {
            config.site.max_links = max_links;
        }

        if let Some(timeout) = env_parse("ALBUMSCRAPE_REQUEST_TIMEOUT") {
            config.crawler.request_timeout_secs = timeout;
        }
        if let Some(timeout) = env_parse("ALBUMSCRAPE_LISTING_TIMEOUT") {
            config.crawler.listing_timeout_secs = timeout;
        }
        if let Some(rate) = env_parse("ALBUMSCRAPE_RATE_LIMIT") {
            config.crawler.requests_per_second = rate;
        }
        if let Some(user_agent) = env_string("ALBUMSCRAPE_USER_AGENT") {
            config.crawler.user_agent = user_agent;
        }

        if let Some(path) = env_string("ALBUMSCRAPE_URLS_FILE") {
            config.storage.urls_file = path.into();
        }
        if let Some(path) = env_string("ALBUMSCRAPE_PAGES_DIR") {
            config.storage.pages_dir = path.into();
        }
        if let Some(path) = env_string("ALBUMSCRAPE_CLEANED_DIR") {
            config.storage.cleaned_dir = path.into();
        }

        if let Some(level) = env_string("ALBUMSCRAPE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = env_string("ALBUMSCRAPE_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// Sections and keys missing from the file keep their default value.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.site.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }

        url::Url::parse(&self.site.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.site.base_url))?;

        if !self.site.listing_path.contains(PAGE_PLACEHOLDER) {
            anyhow::bail!("listing_path must contain the {PAGE_PLACEHOLDER} placeholder");
        }

        regex::Regex::new(&self.site.link_pattern)
            .with_context(|| format!("Invalid link_pattern: {}", self.site.link_pattern))?;

        if self.site.max_links == 0 {
            anyhow::bail!("max_links must be greater than 0");
        }

        if self.crawler.request_timeout_secs == 0 || self.crawler.listing_timeout_secs == 0 {
            anyhow::bail!("request timeouts must be greater than 0");
        }

        if self.crawler.requests_per_second == 0 {
            anyhow::bail!("requests_per_second must be greater than 0");
        }

        if self.storage.index_file.trim().is_empty() {
            anyhow::bail!("index_file must not be empty");
        }

        Ok(())
    }

    /// Get review page request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Get listing page request timeout as Duration
    #[must_use]
    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.listing_timeout_secs)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://pitchfork.com"),
            listing_path: String::from("/reviews/albums/?page={page}"),
            link_pattern: String::from(r"^/reviews/albums/[a-z0-9\-\._]+/$"),
            max_links: 200,
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 20,
            listing_timeout_secs: 15,
            requests_per_second: 10,
            user_agent: format!("albumscrape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            urls_file: PathBuf::from("urls.txt"),
            pages_dir: PathBuf::from("pages"),
            index_file: String::from("index.txt"),
            cleaned_dir: PathBuf::from("cleaned"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.trim().parse::<T>().ok())
}
