//! Backend service that serves program images from a URL template.
//!
//! Many guide providers expose artwork at a predictable address such as
//! `https://guide.example/art/{channel_id}/{program_id}.jpg`. This service
//! fills in the placeholders and downloads the result.

use std::sync::Arc;

use async_trait::async_trait;
use guideart_common::paths::is_image_content_type;
use guideart_common::{Error, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::service::{LiveTvService, StreamResponse};
use crate::net::HttpClient;

/// Placeholder replaced with the URL-encoded program id.
pub const PROGRAM_ID_PLACEHOLDER: &str = "{program_id}";
/// Placeholder replaced with the URL-encoded channel id.
pub const CHANNEL_ID_PLACEHOLDER: &str = "{channel_id}";

/// A [`LiveTvService`] that downloads program images from a templated URL.
pub struct UrlTemplateService {
    name: String,
    url_template: String,
    http: Arc<dyn HttpClient>,
}

impl UrlTemplateService {
    /// Create a service named `name` fetching from `url_template`.
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            http,
        }
    }

    /// Build the request URL for a program on a channel.
    pub fn image_url(&self, program_id: &str, channel_id: &str) -> String {
        self.url_template
            .replace(PROGRAM_ID_PLACEHOLDER, &urlencoding::encode(program_id))
            .replace(CHANNEL_ID_PLACEHOLDER, &urlencoding::encode(channel_id))
    }
}

impl std::fmt::Debug for UrlTemplateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlTemplateService")
            .field("name", &self.name)
            .field("url_template", &self.url_template)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LiveTvService for UrlTemplateService {
    fn name(&self) -> &str {
        &self.name
    }

    /// Download the program image.
    ///
    /// Every failure other than cancellation is reported as
    /// [`Error::Service`], including an HTTP 404 from the backend.
    async fn get_program_image(
        &self,
        program_id: &str,
        channel_id: &str,
        cancel: &CancellationToken,
    ) -> Result<StreamResponse> {
        let url = self.image_url(program_id, channel_id);
        debug!(service = %self.name, url = %url, "Fetching program image from service");

        let response = self.http.get(&url, cancel).await.map_err(|e| match e {
            Error::Cancelled => Error::Cancelled,
            other => Error::service(&self.name, other.to_string()),
        })?;

        if !is_image_content_type(&response.content_type) {
            return Err(Error::service(
                &self.name,
                format!(
                    "returned non-image content type '{}' for {}",
                    response.content_type, url
                ),
            ));
        }

        Ok(StreamResponse {
            stream: response.content,
            mime_type: response.content_type,
        })
    }
}
