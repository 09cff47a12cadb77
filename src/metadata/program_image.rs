//! Primary image provider for live TV programs.
//!
//! A program's image can come from three places, tried in a fixed order:
//!
//! 1. a local file named by [`ProgramInfo::image_path`],
//! 2. a remote URL named by [`ProgramInfo::image_url`],
//! 3. the backend service that produced the program.
//!
//! Only the first configured source is used. If it fails, the lower-priority
//! sources are not consulted. The resolved bytes are handed to an
//! [`ImageSink`] as the program's primary image.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use guideart_common::paths::{image_content_type, is_image_content_type};
use guideart_common::{Error, ImageType, ItemKind, ItemUpdateType, ProviderPriority, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::provider::{Item, MetadataProvider, ProviderInfo};
use crate::cancel::cancellable;
use crate::fs::FileSystem;
use crate::images::{ImageSink, ImageStream};
use crate::live_tv::{LiveTvProgram, LiveTvService, ProgramInfo, ServiceRegistry};
use crate::net::HttpClient;

/// Where a program's image will be read from.
pub enum ImageSource<'a> {
    /// A file on the local filesystem.
    LocalFile(&'a str),
    /// A remote HTTP(S) URL.
    RemoteUrl(&'a str),
    /// The backend service that produced the program.
    Service(&'a dyn LiveTvService),
    /// No source is configured or resolvable.
    None,
}

impl<'a> ImageSource<'a> {
    /// Pick the single source to use for `info`.
    ///
    /// A non-empty `image_path` wins over a non-empty `image_url`, which wins
    /// over a registered service whose name matches `service_name`.
    pub fn select(info: &'a ProgramInfo, services: &'a ServiceRegistry) -> Self {
        if let Some(path) = info.image_path() {
            return Self::LocalFile(path);
        }
        if let Some(url) = info.image_url() {
            return Self::RemoteUrl(url);
        }
        match services.get(&info.service_name) {
            Some(service) => Self::Service(service),
            None => Self::None,
        }
    }
}

impl fmt::Debug for ImageSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalFile(path) => f.debug_tuple("LocalFile").field(path).finish(),
            Self::RemoteUrl(url) => f.debug_tuple("RemoteUrl").field(url).finish(),
            Self::Service(service) => f.debug_tuple("Service").field(&service.name()).finish(),
            Self::None => f.write_str("None"),
        }
    }
}

/// Image bytes read from a source, not yet handed to the sink.
struct FetchedImage {
    stream: ImageStream,
    content_type: String,
}

/// Metadata provider that downloads a primary image for live TV programs
/// that do not have one yet.
pub struct ProgramImageProvider {
    services: Arc<ServiceRegistry>,
    file_system: Arc<dyn FileSystem>,
    http: Arc<dyn HttpClient>,
    sink: Arc<dyn ImageSink>,
}

impl ProgramImageProvider {
    /// Create a new `ProgramImageProvider`.
    ///
    /// # Arguments
    ///
    /// * `services` - Backend services, looked up by program service name
    /// * `file_system` - Used to open local image paths
    /// * `http` - Used to download remote image URLs
    /// * `sink` - Receives resolved images
    pub fn new(
        services: Arc<ServiceRegistry>,
        file_system: Arc<dyn FileSystem>,
        http: Arc<dyn HttpClient>,
        sink: Arc<dyn ImageSink>,
    ) -> Self {
        Self {
            services,
            file_system,
            http,
            sink,
        }
    }

    /// Resolve and save the primary image for `program`.
    ///
    /// Returns `Ok(true)` if an image was handed to the sink and `Ok(false)`
    /// if no source was available.
    pub async fn download_image(
        &self,
        program: &LiveTvProgram,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let info = &program.program_info;
        let source = ImageSource::select(info, &self.services);

        debug!(
            item_id = %program.id,
            program_id = %info.id,
            source = ?source,
            "Selected program image source"
        );

        let Some(image) = self.open(source, info, cancel).await? else {
            return Ok(false);
        };

        // Provenance only; never parsed.
        let source_url = format!("{}{}", info.service_name, info.id);

        // The sink observes `cancel` itself up to its commit point.
        self.sink
            .save_image(
                program,
                image.stream,
                &image.content_type,
                ImageType::Primary,
                None,
                &source_url,
                cancel,
            )
            .await?;

        Ok(true)
    }

    async fn open(
        &self,
        source: ImageSource<'_>,
        info: &ProgramInfo,
        cancel: &CancellationToken,
    ) -> Result<Option<FetchedImage>> {
        match source {
            ImageSource::LocalFile(path) => {
                let path = Path::new(path);
                let content_type = image_content_type(path);
                let stream = cancellable(cancel, self.file_system.open_read(path)).await?;
                Ok(Some(FetchedImage {
                    stream,
                    content_type,
                }))
            }
            ImageSource::RemoteUrl(url) => {
                let response = cancellable(cancel, self.http.get(url, cancel)).await?;

                if !is_image_content_type(&response.content_type) {
                    let content_type = response.content_type;
                    drop(response.content);
                    return Err(Error::invalid_response(format!(
                        "{url} did not return an image content type (got '{content_type}')"
                    )));
                }

                Ok(Some(FetchedImage {
                    stream: response.content,
                    content_type: response.content_type,
                }))
            }
            ImageSource::Service(service) => {
                let response = cancellable(
                    cancel,
                    service.get_program_image(&info.id, &info.channel_id, cancel),
                )
                .await?;
                Ok(Some(FetchedImage {
                    stream: response.stream,
                    content_type: response.mime_type,
                }))
            }
            ImageSource::None => Ok(None),
        }
    }
}

impl fmt::Debug for ProgramImageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramImageProvider")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataProvider for ProgramImageProvider {
    fn name(&self) -> &'static str {
        "program-image"
    }

    fn supports(&self, item: &dyn Item) -> bool {
        item.kind() == ItemKind::LiveTvProgram
    }

    fn needs_refresh(&self, item: &dyn Item) -> bool {
        !item.has_image(ImageType::Primary)
    }

    /// Download a primary image unless the item already has one.
    ///
    /// `force` does not override an existing primary image. An HTTP 404 from
    /// the image URL counts as success; every other failure is returned and
    /// leaves `info` untouched.
    async fn fetch(
        &self,
        item: &dyn Item,
        _force: bool,
        info: &mut ProviderInfo,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if item.has_image(ImageType::Primary) {
            debug!(item_id = %item.id(), "Primary image already present; skipping");
            info.set_last_refreshed(Utc::now(), self.version());
            return Ok(());
        }

        let program = item.as_live_tv_program().ok_or_else(|| {
            Error::invalid_input(format!(
                "{} is a {}, not a live TV program",
                item.id(),
                item.kind()
            ))
        })?;

        match self.download_image(program, cancel).await {
            Ok(true) => info!(item_id = %program.id, "Saved program primary image"),
            Ok(false) => debug!(item_id = %program.id, "No program image source available"),
            Err(e) if e.is_not_found() => warn!(
                item_id = %program.id,
                error = %e,
                "Program image not found upstream; continuing without it"
            ),
            Err(e) => return Err(e),
        }

        info.set_last_refreshed(Utc::now(), self.version());
        Ok(())
    }

    fn priority(&self) -> ProviderPriority {
        ProviderPriority::Second
    }

    fn item_update_type(&self) -> ItemUpdateType {
        ItemUpdateType::ImageUpdate
    }
}
