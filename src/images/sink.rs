use async_trait::async_trait;
use guideart_common::{ImageType, Result};
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;

use crate::metadata::Item;

/// An owned stream of image bytes.
///
/// Dropping the stream releases the underlying file handle or HTTP body.
pub type ImageStream = Box<dyn AsyncRead + Send + Unpin>;

/// Persistence contract for resolved images.
///
/// The sink takes ownership of `stream`: it reads it to completion (or
/// abandons it on error) and is responsible for releasing it.
#[async_trait]
pub trait ImageSink: Send + Sync {
    /// Persist `stream` as the `image_type` image of `item`.
    ///
    /// `image_index` selects a slot for multi-valued image types and is
    /// `None` for single-valued ones. `source_url` is an opaque provenance
    /// tag recorded alongside the image.
    ///
    /// If `cancel` fires before the image is committed the sink returns
    /// [`Error::Cancelled`](guideart_common::Error::Cancelled) and leaves no
    /// trace of the image. Once committed, the save runs to completion.
    #[allow(clippy::too_many_arguments)]
    async fn save_image(
        &self,
        item: &dyn Item,
        stream: ImageStream,
        content_type: &str,
        image_type: ImageType,
        image_index: Option<usize>,
        source_url: &str,
        cancel: &CancellationToken,
    ) -> Result<()>;
}
