//! Guideart-Common: Shared types, IDs, and errors.
//!
//! This crate provides common functionality used across guideart:
//!
//! - **Typed IDs**: A UUID wrapper for catalog items
//! - **Core Types**: Enums for item kinds, image types, provider priorities
//!   and refresh outcomes
//! - **Path Utilities**: Content type detection from file extensions
//! - **Error Handling**: The typed error used by every image source
//!
//! # Examples
//!
//! ```
//! use guideart_common::{Error, ImageType, ItemId, Result};
//! use guideart_common::paths::image_content_type;
//! use std::path::Path;
//!
//! let item_id = ItemId::for_program("HDHomeRun", "prog123");
//! assert_eq!(item_id, ItemId::for_program("hdhomerun", "prog123"));
//! assert_eq!(ImageType::Primary.to_string(), "primary");
//! assert_eq!(image_content_type(Path::new("/media/img.JPG")), "image/jpg");
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::http("http://guide.example/p.png", Some(404), "Not Found"))
//! }
//! assert!(lookup().unwrap_err().is_not_found());
//! ```

pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
