//! HTTP fetcher with rate limiting and charset-aware decoding
//!
//! This module provides the single HTTP entry point used by both the link
//! discovery and page download stages:
//! - Rate limiting with governor
//! - Per-request timeout override (listing pages use a shorter one)
//! - Charset detection from `Content-Type` with a lossy fallback
//! - Optional base URL override for mock servers
//!
//! Requests are never retried: the first non-success status is returned to
//! the caller, which decides whether to stop.

use crate::config::Config;
use crate::utils::decode_with_charset;
use crate::utils::error::FetchError;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT},
    Client, Response,
};
use std::num::NonZeroU32;
use std::time::Duration;

/// Default timeout for review page requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Rate-limited page fetcher
pub struct PageFetcher {
    /// HTTP client with configured timeout, compression and cookies
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// Optional base URL for relative paths and mock servers
    base_url: Option<String>,
}

impl PageFetcher {
    /// Create a new fetcher with default settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(requests_per_second: u32) -> Result<Self, FetchError> {
        Self::with_config(
            requests_per_second,
            DEFAULT_TIMEOUT,
            &format!("albumscrape/{}", env!("CARGO_PKG_VERSION")),
        )
    }

    /// Create a new fetcher with custom configuration
    ///
    /// # Arguments
    ///
    /// * `requests_per_second` - Maximum number of requests per second (0 is treated as 1)
    /// * `timeout` - Default request timeout
    /// * `user_agent` - User-Agent header sent with every request
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(
        requests_per_second: u32,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .default_headers(Self::build_headers(user_agent))
            .build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
            base_url: None,
        })
    }

    /// Create a fetcher from the crawler section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::with_config(
            config.crawler.requests_per_second,
            config.request_timeout(),
            &config.crawler.user_agent,
        )
    }

    /// Create a new fetcher with a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, requests_per_second: u32) -> Result<Self, FetchError> {
        let mut fetcher = Self::new(requests_per_second)?;
        fetcher.base_url = Some(base_url.trim_end_matches('/').to_string());
        Ok(fetcher)
    }

    /// Fetch a page using the default timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ServerError` for any non-success status,
    /// `FetchError::Timeout` when the request times out and
    /// `FetchError::InvalidUrl` when the target cannot be parsed
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_inner(url, None).await
    }

    /// Fetch a page with a per-request timeout
    ///
    /// # Errors
    ///
    /// Same as [`PageFetcher::fetch`]
    pub async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        self.fetch_inner(url, Some(timeout)).await
    }

    async fn fetch_inner(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<String, FetchError> {
        let full_url = self.resolve(url)?;

        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let mut request = self.client.get(full_url.as_str());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %full_url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::ServerError(status.as_u16()));
        }

        self.decode_response(response).await
    }

    /// Absolute request URL for `url`
    ///
    /// Absolute URLs are used as-is; anything else is appended to the base URL.
    fn resolve(&self, url: &str) -> Result<url::Url, FetchError> {
        let candidate = match (&self.base_url, url::Url::parse(url)) {
            (_, Ok(absolute)) => return Ok(absolute),
            (Some(base), Err(_)) => format!("{base}{url}"),
            (None, Err(_)) => url.to_string(),
        };

        url::Url::parse(&candidate).map_err(|_| FetchError::InvalidUrl(url.to_string()))
    }

    /// Decode the response body using the declared charset when present
    async fn decode_response(&self, response: Response) -> Result<String, FetchError> {
        // Copy the Content-Type before consuming the response
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await?;

        Ok(decode_with_charset(&bytes, &content_type))
    }

    /// Build default HTTP headers
    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        }

        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = PageFetcher::new(10);
        assert!(fetcher.is_ok());

        let fetcher = PageFetcher::with_config(0, Duration::from_secs(5), "test-agent");
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_fetcher_from_config() {
        let fetcher = PageFetcher::from_config(&Config::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_fetcher_with_base_url() {
        let fetcher = PageFetcher::with_base_url("http://localhost:8080/", 10).unwrap();
        assert_eq!(fetcher.base_url, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let fetcher = PageFetcher::with_base_url("http://localhost:8080", 10).unwrap();

        let url = fetcher.resolve("/reviews/albums/x/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/reviews/albums/x/");

        let url = fetcher.resolve("https://example.com/a").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_resolve_invalid_without_base() {
        let fetcher = PageFetcher::new(10).unwrap();
        let err = fetcher.resolve("/relative/only").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_default_headers() {
        let headers = PageFetcher::build_headers("albumscrape/test");
        assert_eq!(
            headers.get(USER_AGENT).unwrap().to_str().unwrap(),
            "albumscrape/test"
        );
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }
}
