//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts an Axum "guide art" server on a
//! random port and wires a [`ProgramImageProvider`] against it using the real
//! `reqwest` client, the local filesystem, and a [`DirectoryImageSink`]
//! rooted in a temporary directory.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;

use guideart::config::HttpConfig;
use guideart::fs::LocalFileSystem;
use guideart::images::DirectoryImageSink;
use guideart::live_tv::{LiveTvProgram, ProgramInfo, ServiceRegistry, UrlTemplateService};
use guideart::metadata::ProgramImageProvider;
use guideart::net::{HttpClient, ReqwestHttpClient};
use guideart_common::ItemId;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nguide-art";

/// Routes served by the fake guide art server.
fn art_router() -> Router {
    Router::new()
        .route(
            "/art/poster.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES) }),
        )
        .route("/art/missing.png", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/art/broken.png",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/art/page",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html></html>") }),
        )
        .route(
            "/art/slow.png",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES)
            }),
        )
        .route(
            "/guide/:channel/:program",
            get(|Path((channel, program)): Path<(String, String)>| async move {
                (
                    [(header::CONTENT_TYPE, "image/jpeg")],
                    format!("{channel}/{program}"),
                )
            }),
        )
}

/// Test harness wrapping a running art server and a provider wired to it.
pub struct TestHarness {
    pub addr: SocketAddr,
    pub images: tempfile::TempDir,
    pub http: Arc<dyn HttpClient>,
    pub provider: ProgramImageProvider,
}

impl TestHarness {
    /// Start the art server with no backend services registered.
    pub async fn start() -> Self {
        Self::with_services(&[]).await
    }

    /// Start the art server and register `(name, path_template)` services.
    ///
    /// Templates are relative to the server root, e.g.
    /// `/guide/{channel_id}/{program_id}`.
    pub async fn with_services(services: &[(&str, &str)]) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, art_router()).await.ok();
        });

        let http: Arc<dyn HttpClient> = Arc::new(
            ReqwestHttpClient::new(&HttpConfig::default()).expect("failed to build client"),
        );

        let mut registry = ServiceRegistry::new();
        for (name, template) in services {
            registry.register(Arc::new(UrlTemplateService::new(
                *name,
                format!("http://{addr}{template}"),
                http.clone(),
            )));
        }

        let images = tempfile::tempdir().expect("failed to create images dir");
        let provider = ProgramImageProvider::new(
            Arc::new(registry),
            Arc::new(LocalFileSystem),
            http.clone(),
            Arc::new(DirectoryImageSink::new(images.path().to_path_buf())),
        );

        Self {
            addr,
            images,
            http,
            provider,
        }
    }

    /// Absolute URL for a path on the art server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Image files (excluding provenance sidecars) saved for `item_id`.
    pub fn saved_images(&self, item_id: ItemId) -> Vec<PathBuf> {
        let dir = self.images.path().join(item_id.to_string());
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext != "source"))
            .collect();
        files.sort();
        files
    }
}

/// A program from service `ServiceX` with id `prog123` on channel `ch7`.
pub fn program(image_path: Option<&str>, image_url: Option<&str>) -> LiveTvProgram {
    LiveTvProgram::new(
        "Evening News",
        ProgramInfo {
            id: "prog123".to_string(),
            channel_id: "ch7".to_string(),
            service_name: "ServiceX".to_string(),
            image_path: image_path.map(str::to_string),
            image_url: image_url.map(str::to_string),
        },
    )
}
