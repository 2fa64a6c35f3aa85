//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client from `HttpConfig`
//! - GET requests for listing pages
//! - Classifying failures as transport errors or non-success statuses
//!
//! There are no retries. A non-2xx response is an error; its body is never
//! handed to the parser.

use crate::config::HttpConfig;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of raw page HTML
///
/// `Paginator` fetches through this trait so tests can serve fixture pages
/// without a network.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches the page at `url` and returns its body
    async fn fetch(&self, url: &Url) -> Result<String, HarvestError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(timeout_ms) = config.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }

    builder.build()
}

/// `PageSource` backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self, HarvestError> {
        let client = build_http_client(config).map_err(HarvestError::Client)?;
        tracing::debug!(
            "HTTP client ready (user agent: {}, timeout: {:?}ms)",
            config.user_agent,
            config.timeout_ms
        );
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, HarvestError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
    }
}
