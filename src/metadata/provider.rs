//! Trait definition and types for metadata providers.
//!
//! This module defines the [`MetadataProvider`] trait that the per-item
//! refresh pipeline drives, the [`Item`] accessor it hands to providers, and
//! the [`ProviderInfo`] record each provider stamps when a refresh completes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use guideart_common::{
    ImageType, ItemId, ItemKind, ItemUpdateType, ProviderPriority, RefreshStatus, Result,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::live_tv::LiveTvProgram;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Read access to a catalog item, as seen by metadata providers.
pub trait Item: Send + Sync {
    /// Catalog identifier.
    fn id(&self) -> ItemId;

    /// Kind of item.
    fn kind(&self) -> ItemKind;

    /// Returns `true` if an image of `image_type` is already stored.
    fn has_image(&self, image_type: ImageType) -> bool;

    /// Downcast to a live TV program.
    fn as_live_tv_program(&self) -> Option<&LiveTvProgram> {
        None
    }
}

// ---------------------------------------------------------------------------
// Refresh bookkeeping
// ---------------------------------------------------------------------------

/// Per-item, per-provider refresh record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// When the provider last completed a refresh of the item.
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Outcome of the last refresh.
    pub last_refresh_status: RefreshStatus,
    /// Version of the provider that performed the last refresh.
    pub provider_version: Option<String>,
}

impl ProviderInfo {
    /// Record a successful refresh at `at` by provider version `version`.
    pub fn set_last_refreshed(&mut self, at: DateTime<Utc>, version: &str) {
        self.last_refreshed = Some(at);
        self.last_refresh_status = RefreshStatus::Success;
        self.provider_version = Some(version.to_string());
    }
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait that all metadata providers must implement.
///
/// The refresh pipeline filters providers with [`supports`](Self::supports)
/// and [`needs_refresh`](Self::needs_refresh), orders them by
/// [`priority`](Self::priority), and calls [`fetch`](Self::fetch) on each.
///
/// Providers hold no per-item state, so a single instance may serve many
/// concurrent fetches.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"program-image"`).
    fn name(&self) -> &'static str;

    /// Version recorded in [`ProviderInfo`] after each refresh.
    fn version(&self) -> &'static str {
        "1"
    }

    /// Returns `true` when this provider applies to `item`.
    fn supports(&self, item: &dyn Item) -> bool;

    /// Returns `true` when `item` is missing what this provider supplies.
    fn needs_refresh(&self, item: &dyn Item) -> bool;

    /// Refresh `item`, stamping `info` on success.
    ///
    /// On error `info` is left untouched.
    async fn fetch(
        &self,
        item: &dyn Item,
        force: bool,
        info: &mut ProviderInfo,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Slot this provider runs in.
    fn priority(&self) -> ProviderPriority;

    /// Kind of change a successful fetch makes.
    fn item_update_type(&self) -> ItemUpdateType;
}
