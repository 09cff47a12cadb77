//! Image persistence.
//!
//! Resolved images are handed to an [`ImageSink`] together with ownership of
//! their byte stream. [`DirectoryImageSink`] is the filesystem implementation
//! used by the `guideart` binary.

mod sink;
mod storage;

pub use sink::{ImageSink, ImageStream};
pub use storage::{DirectoryImageSink, StoredImage};
