//! Live TV program (guide entry) entity.

use std::collections::HashMap;

use guideart_common::{ImageType, ItemId, ItemKind};
use serde::{Deserialize, Serialize};

use crate::metadata::Item;

/// Source record describing where a program came from and where its image
/// may be found.
///
/// `image_path` and `image_url` are both optional; an empty string is treated
/// the same as an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    /// Program identifier assigned by the backend service.
    pub id: String,
    /// Channel identifier assigned by the backend service.
    pub channel_id: String,
    /// Name of the backend service that produced this program.
    pub service_name: String,
    /// Local filesystem path to the program image.
    #[serde(default)]
    pub image_path: Option<String>,
    /// Remote URL of the program image.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProgramInfo {
    /// The configured local image path, ignoring empty strings.
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref().filter(|p| !p.is_empty())
    }

    /// The configured remote image URL, ignoring empty strings.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// A scheduled live TV program.
///
/// When deserialized without an `id`, the ID is derived from the service
/// name and program id, so the same guide entry always maps to the same
/// catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ProgramRecord")]
pub struct LiveTvProgram {
    /// Catalog identifier.
    pub id: ItemId,
    /// Display name of the program.
    pub name: String,
    /// Source record supplied by the backend service.
    pub program_info: ProgramInfo,
    /// Stored images keyed by type, valued by storage location.
    #[serde(default)]
    pub images: HashMap<ImageType, String>,
}

impl LiveTvProgram {
    /// Create a program with no stored images and a derived ID.
    pub fn new(name: impl Into<String>, program_info: ProgramInfo) -> Self {
        Self {
            id: ItemId::for_program(&program_info.service_name, &program_info.id),
            name: name.into(),
            program_info,
            images: HashMap::new(),
        }
    }
}

/// Serialized form of [`LiveTvProgram`] with an optional `id`.
#[derive(Deserialize)]
struct ProgramRecord {
    #[serde(default)]
    id: Option<ItemId>,
    name: String,
    program_info: ProgramInfo,
    #[serde(default)]
    images: HashMap<ImageType, String>,
}

impl From<ProgramRecord> for LiveTvProgram {
    fn from(record: ProgramRecord) -> Self {
        let id = record.id.unwrap_or_else(|| {
            ItemId::for_program(&record.program_info.service_name, &record.program_info.id)
        });
        Self {
            id,
            name: record.name,
            program_info: record.program_info,
            images: record.images,
        }
    }
}

impl Item for LiveTvProgram {
    fn id(&self) -> ItemId {
        self.id
    }

    fn kind(&self) -> ItemKind {
        ItemKind::LiveTvProgram
    }

    fn has_image(&self, image_type: ImageType) -> bool {
        self.images.contains_key(&image_type)
    }

    fn as_live_tv_program(&self) -> Option<&LiveTvProgram> {
        Some(self)
    }
}
