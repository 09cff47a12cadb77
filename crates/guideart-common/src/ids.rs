//! Typed ID wrappers.
//!
//! Catalog items are identified by UUIDs wrapped in a newtype so they cannot be
//! confused with the string identifiers that backend services use for
//! programs and channels.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a catalog item (program, channel, movie, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Stable ID for the program `program_id` of backend service `service_name`.
    ///
    /// Service names compare case-insensitively, so `"HDHomeRun"` and
    /// `"hdhomerun"` yield the same ID.
    #[must_use]
    pub fn for_program(service_name: &str, program_id: &str) -> Self {
        let key = format!("{}\0{program_id}", service_name.to_lowercase());
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ItemId> for Uuid {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
