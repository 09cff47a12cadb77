//! Trait implemented by live TV backend services.

use std::fmt;

use async_trait::async_trait;
use guideart_common::Result;
use tokio_util::sync::CancellationToken;

use crate::images::ImageStream;

/// Image bytes produced by a backend service.
pub struct StreamResponse {
    /// The image bytes.
    pub stream: ImageStream,
    /// MIME type reported by the service.
    pub mime_type: String,
}

impl fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse")
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

/// A pluggable live TV backend (tuner, guide provider, IPTV source).
///
/// Services are shared across tasks behind an `Arc`.
#[async_trait]
pub trait LiveTvService: Send + Sync {
    /// Display name of the service. Programs refer to their service by this
    /// name, compared case-insensitively.
    fn name(&self) -> &str;

    /// Fetch the image for a program on a channel.
    async fn get_program_image(
        &self,
        program_id: &str,
        channel_id: &str,
        cancel: &CancellationToken,
    ) -> Result<StreamResponse>;
}
