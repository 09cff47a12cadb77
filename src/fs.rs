//! Filesystem access for locally referenced guide images.

use std::path::Path;

use async_trait::async_trait;
use guideart_common::Result;

use crate::images::ImageStream;

/// Read-only filesystem abstraction.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Open `path` for reading.
    ///
    /// The file is opened read-only and other readers are not excluded.
    /// No existence check happens beyond the open itself.
    async fn open_read(&self, path: &Path) -> Result<ImageStream>;
}

/// [`FileSystem`] backed by the local disk through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn open_read(&self, path: &Path) -> Result<ImageStream> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::new(file))
    }
}
