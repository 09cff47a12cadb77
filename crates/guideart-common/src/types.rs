//! Core type definitions for catalog items, images, and provider scheduling.
//!
//! All enums are serialized in lowercase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A single movie.
    Movie,
    /// A scheduled live TV program (guide entry).
    LiveTvProgram,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::LiveTvProgram => write!(f, "livetvprogram"),
        }
    }
}

/// Type of item image/artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Primary poster/thumbnail image.
    Primary,
    /// Background/backdrop image.
    Backdrop,
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Backdrop => write!(f, "backdrop"),
        }
    }
}

/// Execution slot of a metadata provider within a per-item refresh.
///
/// Providers run in ascending order: every `First` provider before any
/// `Second` provider, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPriority {
    /// Runs before all other providers.
    First,
    /// Runs after `First` providers.
    Second,
    /// Runs after `Second` providers.
    Third,
    /// Runs after every other provider.
    Last,
}

impl fmt::Display for ProviderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
            Self::Third => write!(f, "third"),
            Self::Last => write!(f, "last"),
        }
    }
}

/// Kind of change a provider makes to an item when it succeeds.
///
/// The refresh pipeline uses this to decide which notifications to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemUpdateType {
    /// Images were added or replaced.
    ImageUpdate,
}

impl fmt::Display for ItemUpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageUpdate => write!(f, "imageupdate"),
        }
    }
}

/// Outcome of the last refresh a provider performed on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
    /// The provider has never completed a refresh for this item.
    #[default]
    Pending,
    /// The last refresh completed.
    Success,
}

impl fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
        }
    }
}
