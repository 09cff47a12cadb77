//! Integration tests for program primary image resolution.

mod common;

use assert_matches::assert_matches;
use common::{program, TestHarness, PNG_BYTES};
use guideart::metadata::{MetadataProvider, ProviderInfo};
use guideart::net::HttpClient;
use guideart_common::{Error, ImageType, RefreshStatus};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_client_streams_image_body() {
    let h = TestHarness::start().await;

    let mut response = h
        .http
        .get(&h.url("/art/poster.png"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "image/png");

    let mut body = Vec::new();
    response.content.read_to_end(&mut body).await.unwrap();
    assert_eq!(body, PNG_BYTES);
}

#[tokio::test]
async fn http_client_maps_status_codes() {
    let h = TestHarness::start().await;
    let cancel = CancellationToken::new();

    let err = h.http.get(&h.url("/art/missing.png"), &cancel).await.unwrap_err();
    assert!(err.is_not_found());

    let err = h.http.get(&h.url("/art/broken.png"), &cancel).await.unwrap_err();
    assert_matches!(err, Error::Http { status: Some(500), .. });
}

#[tokio::test]
async fn http_client_connection_failure_has_no_status() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let h = TestHarness::start().await;
    let err = h
        .http
        .get(&format!("http://{addr}/art.png"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_matches!(err, Error::Http { status: None, .. });
    assert!(!err.is_not_found());
}

// ---------------------------------------------------------------------------
// Remote URL source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remote_image_is_saved_to_disk() {
    let h = TestHarness::start().await;
    let p = program(None, Some(&h.url("/art/poster.png")));
    let mut info = ProviderInfo::default();

    h.provider
        .fetch(&p, false, &mut info, &CancellationToken::new())
        .await
        .unwrap();

    let saved = h.saved_images(p.id);
    assert_eq!(saved.len(), 1);
    assert!(saved[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("primary_"));
    assert_eq!(saved[0].extension().unwrap(), "png");
    assert_eq!(std::fs::read(&saved[0]).unwrap(), PNG_BYTES);

    let mut sidecar = saved[0].clone().into_os_string();
    sidecar.push(".source");
    assert_eq!(std::fs::read_to_string(sidecar).unwrap(), "ServiceXprog123");

    assert_eq!(info.last_refresh_status, RefreshStatus::Success);
}

#[tokio::test]
async fn remote_not_found_still_succeeds() {
    let h = TestHarness::start().await;
    let p = program(None, Some(&h.url("/art/missing.png")));
    let mut info = ProviderInfo::default();

    h.provider
        .fetch(&p, false, &mut info, &CancellationToken::new())
        .await
        .unwrap();

    assert!(h.saved_images(p.id).is_empty());
    assert_eq!(info.last_refresh_status, RefreshStatus::Success);
    assert!(info.last_refreshed.is_some());
}

#[tokio::test]
async fn remote_server_error_fails_refresh() {
    let h = TestHarness::start().await;
    let p = program(None, Some(&h.url("/art/broken.png")));
    let mut info = ProviderInfo::default();

    let err = h
        .provider
        .fetch(&p, false, &mut info, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(h.saved_images(p.id).is_empty());
    assert_eq!(info.last_refresh_status, RefreshStatus::Pending);
}

#[tokio::test]
async fn remote_html_page_is_invalid_response() {
    let h = TestHarness::start().await;
    let p = program(None, Some(&h.url("/art/page")));

    let err = h
        .provider
        .fetch(&p, false, &mut ProviderInfo::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_matches!(err, Error::InvalidResponse(_));
    assert!(h.saved_images(p.id).is_empty());
}

#[tokio::test]
async fn cancelling_slow_download_reports_cancellation() {
    let h = TestHarness::start().await;
    let p = program(None, Some(&h.url("/art/slow.png")));
    let mut info = ProviderInfo::default();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = h.provider.fetch(&p, false, &mut info, &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(h.saved_images(p.id).is_empty());
    assert_eq!(info, ProviderInfo::default());
}

// ---------------------------------------------------------------------------
// Local file source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn local_file_wins_over_url() {
    let h = TestHarness::start().await;
    let media = tempfile::tempdir().unwrap();
    let path = media.path().join("img.JPG");
    std::fs::write(&path, b"\xFF\xD8\xFF local jpeg").unwrap();

    // The URL would fail with 500 if it were consulted.
    let p = program(Some(path.to_str().unwrap()), Some(&h.url("/art/broken.png")));

    h.provider
        .fetch(&p, false, &mut ProviderInfo::default(), &CancellationToken::new())
        .await
        .unwrap();

    let saved = h.saved_images(p.id);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].extension().unwrap(), "jpg");
    assert_eq!(std::fs::read(&saved[0]).unwrap(), b"\xFF\xD8\xFF local jpeg");
}

#[tokio::test]
async fn missing_local_file_fails_refresh() {
    let h = TestHarness::start().await;
    let media = tempfile::tempdir().unwrap();
    let path = media.path().join("gone.jpg");
    let p = program(Some(path.to_str().unwrap()), Some(&h.url("/art/poster.png")));

    let err = h
        .provider
        .fetch(&p, false, &mut ProviderInfo::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_matches!(err, Error::Io(_));
    assert!(h.saved_images(p.id).is_empty());
}

// ---------------------------------------------------------------------------
// Backend service source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_service_supplies_image() {
    let h = TestHarness::with_services(&[("servicex", "/guide/{channel_id}/{program_id}")]).await;
    let p = program(None, None);

    h.provider
        .fetch(&p, false, &mut ProviderInfo::default(), &CancellationToken::new())
        .await
        .unwrap();

    let saved = h.saved_images(p.id);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].extension().unwrap(), "jpg");
    assert_eq!(std::fs::read_to_string(&saved[0]).unwrap(), "ch7/prog123");
}

#[tokio::test]
async fn unknown_service_is_a_no_op() {
    let h = TestHarness::with_services(&[("OtherGuide", "/guide/{channel_id}/{program_id}")]).await;
    let p = program(None, None);
    let mut info = ProviderInfo::default();

    h.provider
        .fetch(&p, false, &mut info, &CancellationToken::new())
        .await
        .unwrap();

    assert!(h.saved_images(p.id).is_empty());
    assert_eq!(info.last_refresh_status, RefreshStatus::Success);
}

#[tokio::test]
async fn backend_service_not_found_is_not_swallowed() {
    let h = TestHarness::with_services(&[("ServiceX", "/art/missing.png?p={program_id}")]).await;
    let p = program(None, None);

    let err = h
        .provider
        .fetch(&p, false, &mut ProviderInfo::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_matches!(err, Error::Service { .. });
}

// ---------------------------------------------------------------------------
// Existing images
// ---------------------------------------------------------------------------

#[tokio::test]
async fn existing_primary_image_is_left_alone() {
    let h = TestHarness::start().await;
    let mut p = program(None, Some(&h.url("/art/poster.png")));
    p.images.insert(ImageType::Primary, "existing.jpg".into());
    assert!(!h.provider.needs_refresh(&p));

    let mut info = ProviderInfo::default();
    h.provider
        .fetch(&p, true, &mut info, &CancellationToken::new())
        .await
        .unwrap();

    assert!(h.saved_images(p.id).is_empty());
    assert_eq!(info.last_refresh_status, RefreshStatus::Success);
}
