//! Path utilities for deriving image content types.

use std::path::Path;

/// Derive an image content type from a path's extension.
///
/// The extension is lowercased and appended to `image/` as-is; no attempt is
/// made to map it to a registered MIME subtype (`.jpg` stays `image/jpg`).
/// A path without an extension yields the bare `image/` prefix.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use guideart_common::paths::image_content_type;
///
/// assert_eq!(image_content_type(Path::new("/media/img.jpg")), "image/jpg");
/// assert_eq!(image_content_type(Path::new("poster.PNG")), "image/png");
/// assert_eq!(image_content_type(Path::new("noext")), "image/");
/// ```
pub fn image_content_type(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    format!("image/{ext}")
}

/// Check whether a content type declares an image (`image/` prefix, any case).
///
/// # Examples
///
/// ```
/// use guideart_common::paths::is_image_content_type;
///
/// assert!(is_image_content_type("image/png"));
/// assert!(is_image_content_type("IMAGE/JPEG"));
/// assert!(!is_image_content_type("text/html"));
/// ```
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// File extension to use when storing an image with the given content type.
///
/// Parameters after `;` are ignored and `jpeg` is normalized to `jpg`.
/// Anything that is not a recognizable image subtype falls back to `img`.
///
/// # Examples
///
/// ```
/// use guideart_common::paths::extension_for_content_type;
///
/// assert_eq!(extension_for_content_type("image/jpeg"), "jpg");
/// assert_eq!(extension_for_content_type("image/png; charset=binary"), "png");
/// assert_eq!(extension_for_content_type("application/octet-stream"), "img");
/// ```
pub fn extension_for_content_type(content_type: &str) -> String {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if !is_image_content_type(essence) {
        return "img".to_string();
    }

    let subtype = essence[6..].trim_start_matches('.').to_lowercase();
    match subtype.as_str() {
        "" => "img".to_string(),
        "jpeg" | "pjpeg" => "jpg".to_string(),
        "svg+xml" => "svg".to_string(),
        s if s.chars().all(|c| c.is_ascii_alphanumeric()) => s.to_string(),
        _ => "img".to_string(),
    }
}
