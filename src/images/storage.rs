//! Filesystem-level image storage.
//!
//! Stores images on disk organized by item ID using content-hash naming.
//! Bytes are written exactly as received; no decoding or resizing happens.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use guideart_common::paths::extension_for_content_type;
use guideart_common::{Error, ImageType, ItemId, Result};
use sha2::{Digest, Sha256};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::sink::{ImageSink, ImageStream};
use crate::cancel::cancellable;
use crate::metadata::Item;

const COPY_BUF_SIZE: usize = 64 * 1024;

/// Metadata about a stored image file.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Content hash (first 16 hex chars of SHA-256).
    pub hash: String,
    /// Number of bytes written.
    pub size: u64,
    /// Relative path from base_dir to the image file.
    pub path: String,
}

/// Filesystem sink for resolved images.
///
/// Organizes images under `{base_dir}/{item_id}/{type}_{hash}.{ext}`. The
/// provenance tag is written next to the image as `{file}.source`.
///
/// Bytes are staged in a hidden `.{uuid}.partial` file in the item directory
/// and renamed into place once the stream is drained, so a cancelled or
/// failed store leaves no image behind.
#[derive(Debug, Clone)]
pub struct DirectoryImageSink {
    base_dir: PathBuf,
}

impl DirectoryImageSink {
    /// Create a new `DirectoryImageSink` with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Drain `stream` and store its bytes.
    ///
    /// Cancellation is honored while the stream is being read. Once the
    /// stream is drained the token is checked one last time; after that the
    /// store is committed and runs to completion.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The item this image belongs to
    /// * `image_type` - The type of image (primary, backdrop, etc.)
    /// * `stream` - Image bytes; consumed and released by this call
    /// * `content_type` - Declared content type, used for the file extension
    /// * `source_url` - Provenance tag written to the sidecar file
    /// * `cancel` - Aborts the store until it is committed
    pub async fn store(
        &self,
        item_id: &ItemId,
        image_type: ImageType,
        mut stream: ImageStream,
        content_type: &str,
        source_url: &str,
        cancel: &CancellationToken,
    ) -> Result<StoredImage> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let item_dir = self.base_dir.join(item_id.to_string());
        tokio::fs::create_dir_all(&item_dir).await.map_err(|e| {
            Error::storage(format!(
                "Failed to create image directory {}: {e}",
                item_dir.display()
            ))
        })?;

        let partial_path = item_dir.join(format!(".{}.partial", Uuid::new_v4()));
        let staged = stage(&mut stream, &partial_path, cancel).await;
        drop(stream);

        let (hash, size) = match staged {
            Ok(staged) if !cancel.is_cancelled() => staged,
            Ok(_) => {
                remove_quietly(&partial_path).await;
                return Err(Error::Cancelled);
            }
            Err(e) => {
                remove_quietly(&partial_path).await;
                return Err(e);
            }
        };

        let filename = format_filename(image_type, &hash, content_type);
        let file_path = item_dir.join(&filename);
        let sidecar_path = item_dir.join(format!("{filename}.source"));

        debug!(path = %file_path.display(), size, "Committing image to storage");

        if let Err(e) = tokio::fs::write(&sidecar_path, source_url).await {
            remove_quietly(&partial_path).await;
            return Err(Error::storage(format!(
                "Failed to write provenance file {}: {e}",
                sidecar_path.display()
            )));
        }

        if let Err(e) = tokio::fs::rename(&partial_path, &file_path).await {
            remove_quietly(&partial_path).await;
            remove_quietly(&sidecar_path).await;
            return Err(Error::storage(format!(
                "Failed to move image into place at {}: {e}",
                file_path.display()
            )));
        }

        Ok(StoredImage {
            hash,
            size,
            path: format!("{item_id}/{filename}"),
        })
    }

    /// Get the filesystem path for a stored image.
    pub fn get_path(
        &self,
        item_id: &ItemId,
        image_type: ImageType,
        hash: &str,
        content_type: &str,
    ) -> PathBuf {
        self.base_dir
            .join(item_id.to_string())
            .join(format_filename(image_type, hash, content_type))
    }
}

#[async_trait]
impl ImageSink for DirectoryImageSink {
    async fn save_image(
        &self,
        item: &dyn Item,
        stream: ImageStream,
        content_type: &str,
        image_type: ImageType,
        _image_index: Option<usize>,
        source_url: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let item_id = item.id();
        let stored = self
            .store(&item_id, image_type, stream, content_type, source_url, cancel)
            .await?;

        info!(
            item_id = %item_id,
            image_type = %image_type,
            path = %stored.path,
            size = stored.size,
            "Saved image"
        );
        Ok(())
    }
}

/// Copy `stream` into a new file at `path`, hashing as it goes.
///
/// Returns the content hash and the number of bytes written.
async fn stage(
    stream: &mut ImageStream,
    path: &Path,
    cancel: &CancellationToken,
) -> Result<(String, u64)> {
    let storage_err =
        |e: std::io::Error| Error::storage(format!("Failed to write {}: {e}", path.display()));

    let mut file = tokio::fs::File::create(path).await.map_err(storage_err)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut size = 0u64;

    loop {
        let n = cancellable(cancel, async { Ok::<usize, Error>(stream.read(&mut buf).await?) })
            .await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        file.write_all(&buf[..n]).await.map_err(storage_err)?;
        size += n as u64;
    }

    file.flush().await.map_err(storage_err)?;
    Ok((digest_prefix(hasher), size))
}

async fn remove_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove staged file"),
    }
}

/// First 16 hex characters of the finished SHA-256 digest.
fn digest_prefix(hasher: Sha256) -> String {
    let digest = hasher.finalize();
    hex::encode(&digest[..8]) // 8 bytes = 16 hex chars
}

fn format_filename(image_type: ImageType, hash: &str, content_type: &str) -> String {
    format!(
        "{}_{}.{}",
        image_type,
        hash,
        extension_for_content_type(content_type)
    )
}
