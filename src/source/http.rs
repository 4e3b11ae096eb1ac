//! HTTP client for the dev server's merged options endpoint
//!
//! The dev server exposes the runtime's own message loading and merging logic
//! through a development-only endpoint. Each fetch is a single uncached GET.
//!
//! # Example
//!
//! ```no_run
//! use i18n_typegen::source::{HttpMergedOptionsSource, MergedOptionsSource};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpMergedOptionsSource::new("http://localhost:3000/", Duration::from_secs(10))?;
//! let options = source.fetch_merged_options().await?;
//! println!("{} number formats", options.number_formats.len());
//! # Ok(())
//! # }
//! ```

use super::{parse_merged_options, FetchError, MergedOptionsSource};
use crate::infer::MergedOptions;
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Path of the merged options endpoint below the dev server root
pub const MERGED_OPTIONS_ENDPOINT: &str = "__i18n_typegen/merged";

/// Merged options source backed by the dev server endpoint
pub struct HttpMergedOptionsSource {
    url: String,
    http_client: Client,
    timeout: Duration,
}

impl HttpMergedOptionsSource {
    /// Creates a source for the dev server rooted at `dev_server_url`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` when the HTTP client cannot be built.
    pub fn new(dev_server_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: endpoint_url(dev_server_url),
            http_client,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn endpoint_url(dev_server_url: &str) -> String {
    format!(
        "{}/{}",
        dev_server_url.trim_end_matches('/'),
        MERGED_OPTIONS_ENDPOINT
    )
}

#[async_trait]
impl MergedOptionsSource for HttpMergedOptionsSource {
    async fn fetch_merged_options(&self) -> Result<MergedOptions, FetchError> {
        let start = Instant::now();

        let response = self
            .http_client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    FetchError::network(format!("Connection to {} failed: {}", self.url, e))
                } else {
                    FetchError::network(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("Failed to read response body: {}", e)))?;

        let options = parse_merged_options(&body)?;
        debug!(
            url = %self.url,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Fetched merged options"
        );
        Ok(options)
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl fmt::Debug for HttpMergedOptionsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMergedOptionsSource")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
