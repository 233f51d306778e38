//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client from configuration
//! - GET requests to fetch page content
//! - Classifying failures into non-fatal `FetchFailure` values
//!
//! Timeouts belong to the client; the scheduler never imposes its own.

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Why a fetch produced no usable page
///
/// Every variant is a dead end for the chain, never a crawl-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Connection refused, DNS failure, timeout and the like
    Network(String),

    /// The server answered with a non-success status
    Status(u16),

    /// The response body could not be read
    Body(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {}", e),
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Body(e) => write!(f, "failed to read body: {}", e),
        }
    }
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// HTTP status code
        status: u16,
        /// Page body content
        body: String,
    },

    /// The page is unusable; the task yields no successor
    Failure(FetchFailure),
}

/// Source of raw page content
///
/// Implementations must be shareable across worker tasks.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs a GET for `url`
    async fn fetch(&self, url: &Url) -> FetchResult;
}

/// `PageFetcher` backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose client honours the configured timeouts
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use pagechain::config::HttpConfig;
/// use pagechain::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .http1_only()
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Only a 2xx status with a readable body counts as success. No retries are
/// attempted.
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::Failure(FetchFailure::Network(error));
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::Failure(FetchFailure::Status(status.as_u16()));
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::Failure(FetchFailure::Body(e.to_string())),
    }
}
