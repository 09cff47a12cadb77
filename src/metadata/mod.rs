//! Metadata provider system for refreshing catalog items.
//!
//! This module defines the [`MetadataProvider`] trait that the per-item
//! refresh pipeline drives, and the providers guideart ships.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition, the [`Item`] accessor, and refresh bookkeeping.
//! - [`program_image`] -- Primary image resolution for live TV programs.

pub mod program_image;
pub mod provider;

pub use program_image::{ImageSource, ProgramImageProvider};
pub use provider::{Item, MetadataProvider, ProviderInfo};
