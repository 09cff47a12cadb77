//! HTTP client abstraction.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use guideart_common::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cancel::cancellable;
use crate::config::HttpConfig;
use crate::images::ImageStream;

/// A successful HTTP response whose body has not been read yet.
pub struct HttpResponse {
    /// Response status code (always 2xx).
    pub status: u16,
    /// Value of the `Content-Type` header, or an empty string when absent.
    pub content_type: String,
    /// The response body. Dropping it closes the connection.
    pub content: ImageStream,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Minimal HTTP GET client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request for `url`.
    ///
    /// Non-2xx responses fail with [`Error::Http`] carrying the status code.
    /// Transport failures fail with [`Error::Http`] and no status. Firing
    /// `cancel` before the response headers arrive yields
    /// [`Error::Cancelled`].
    async fn get(&self, url: &str, cancel: &CancellationToken) -> Result<HttpResponse>;
}

/// [`HttpClient`] implemented with `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, cancel: &CancellationToken) -> Result<HttpResponse> {
        debug!(url = url, "HTTP GET");

        let response = cancellable(cancel, async {
            self.client.get(url).send().await.map_err(|e| {
                Error::http(url, e.status().map(|s| s.as_u16()), e.to_string())
            })
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(
                url,
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("request failed"),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.bytes_stream().map_err(std::io::Error::other);

        Ok(HttpResponse {
            status: status.as_u16(),
            content_type,
            content: Box::new(StreamReader::new(Box::pin(body))),
        })
    }
}
