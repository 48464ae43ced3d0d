//! Menu page fetcher
//!
//! Retrieves the raw HTML of the menu page. The `Fetcher` trait keeps the
//! transport pluggable so the pipeline can run against canned pages.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Default menu page
pub const DEFAULT_MENU_URL: &str = "https://murkinat.appspot.com/";

/// User agent sent with every request
const USER_AGENT: &str = concat!("ruokalista/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching the menu page
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Received a non-OK HTTP status code: {}", .0.as_u16())]
    Status(StatusCode),
}

/// Source of raw menu HTML
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the page at `url` and returns its body bytes
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    /// Creates a new HttpFetcher with default configuration
    pub fn new() -> Result<Self, TransportError> {
        let http_client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http_client })
    }

    /// Creates a new HttpFetcher around an existing client
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.bytes().await?;
        tracing::debug!("fetched {} ({} bytes)", url, body.len());

        Ok(body.to_vec())
    }
}
