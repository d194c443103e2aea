//! Extension/MIME registry.
//!
//! Static, process-wide tables mapping normalized MIME types to extensions and
//! back, plus the set of extensions the converters accept. The tables are built
//! once on first use and never mutated, so they are shared across requests
//! without locking.
//!
//! Lookups are case-insensitive, accept extensions with or without the leading
//! dot, and ignore MIME parameters (`text/html; charset=utf-8` is `text/html`).
//!
//! # Example
//!
//! ```rust
//! use docdown::core::mime::{extension_for, is_supported, mime_for};
//!
//! assert_eq!(extension_for("Text/HTML; charset=utf-8"), Some(".html"));
//! assert_eq!(mime_for("JPEG"), Some("image/jpeg"));
//! assert!(is_supported("docx"));
//! assert!(!is_supported(".exe"));
//! ```

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

pub const HTML_MIME_TYPE: &str = "text/html";
pub const XHTML_MIME_TYPE: &str = "application/xhtml+xml";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PNG_MIME_TYPE: &str = "image/png";
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const XML_MIME_TYPE: &str = "application/xml";
pub const XML_TEXT_MIME_TYPE: &str = "text/xml";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const EXCEL_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const POWER_POINT_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const LEGACY_POWERPOINT_MIME_TYPE: &str = "application/vnd.ms-powerpoint";

/// Fallback MIME type for content nothing could identify.
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Declared MIME values that carry no information about the content.
const OPAQUE_MIME_TYPES: &[&str] = &[OCTET_STREAM_MIME_TYPE, "binary/octet-stream"];

/// MIME type to extension, aliases included.
static MIME_TO_EXT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(PDF_MIME_TYPE, ".pdf");
    m.insert("application/x-pdf", ".pdf");

    m.insert(LEGACY_POWERPOINT_MIME_TYPE, ".ppt");
    m.insert(POWER_POINT_MIME_TYPE, ".pptx");
    m.insert(DOCX_MIME_TYPE, ".docx");
    m.insert(EXCEL_MIME_TYPE, ".xlsx");

    m.insert(CSV_MIME_TYPE, ".csv");
    m.insert("application/csv", ".csv");
    m.insert("text/comma-separated-values", ".csv");

    m.insert(JSON_MIME_TYPE, ".json");
    m.insert("text/json", ".json");

    m.insert(XML_MIME_TYPE, ".xml");
    m.insert(XML_TEXT_MIME_TYPE, ".xml");

    m.insert(PNG_MIME_TYPE, ".png");
    m.insert(JPEG_MIME_TYPE, ".jpg");
    m.insert("image/jpg", ".jpg");
    m.insert("image/pjpeg", ".jpg");

    m.insert(HTML_MIME_TYPE, ".html");
    m.insert(XHTML_MIME_TYPE, ".html");

    m
});

/// Extension to canonical MIME type. Exactly one MIME per extension.
static EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(".pdf", PDF_MIME_TYPE);
    m.insert(".ppt", LEGACY_POWERPOINT_MIME_TYPE);
    m.insert(".pptx", POWER_POINT_MIME_TYPE);
    m.insert(".docx", DOCX_MIME_TYPE);
    m.insert(".xlsx", EXCEL_MIME_TYPE);
    m.insert(".csv", CSV_MIME_TYPE);
    m.insert(".json", JSON_MIME_TYPE);
    m.insert(".xml", XML_MIME_TYPE);
    m.insert(".png", PNG_MIME_TYPE);
    m.insert(".jpg", JPEG_MIME_TYPE);
    m.insert(".jpeg", JPEG_MIME_TYPE);
    m.insert(".html", HTML_MIME_TYPE);
    m.insert(".htm", HTML_MIME_TYPE);

    m
});

/// Extensions the dispatcher accepts.
static SUPPORTED_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| EXT_TO_MIME.keys().copied().collect());

/// Normalize a MIME value: drop parameters after `;`, trim, lowercase.
pub fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Normalize an extension to lowercase with a single leading dot.
///
/// Returns `None` for an empty (or dot-only) extension.
pub fn normalize_extension(extension: &str) -> Option<String> {
    let bare = extension.trim().trim_start_matches('.');
    if bare.is_empty() {
        return None;
    }
    Some(format!(".{}", bare.to_ascii_lowercase()))
}

/// Whether a declared MIME value says nothing about the content.
pub fn is_opaque_mime(mime_type: &str) -> bool {
    let normalized = normalize_mime(mime_type);
    normalized.is_empty() || OPAQUE_MIME_TYPES.contains(&normalized.as_str())
}

/// Whether a MIME value names an HTML document.
pub fn is_html_mime(mime_type: &str) -> bool {
    let normalized = normalize_mime(mime_type);
    normalized == HTML_MIME_TYPE || normalized == XHTML_MIME_TYPE
}

/// Registry extension for a MIME type.
pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    MIME_TO_EXT.get(normalize_mime(mime_type).as_str()).copied()
}

/// Canonical registry MIME type for an extension.
pub fn mime_for(extension: &str) -> Option<&'static str> {
    let ext = normalize_extension(extension)?;
    EXT_TO_MIME.get(ext.as_str()).copied()
}

/// Whether the extension is in the supported set.
pub fn is_supported(extension: &str) -> bool {
    normalize_extension(extension).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(ext.as_str()))
}

/// Supported extensions, sorted.
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions: Vec<_> = SUPPORTED_EXTENSIONS.iter().copied().collect();
    extensions.sort_unstable();
    extensions
}

/// Generic MIME lookup for an extension, outside the registry.
///
/// Falls back to the `mime_guess` database, which knows far more extensions
/// than the converters support.
pub fn guess_mime_from_extension(extension: &str) -> Option<String> {
    let ext = normalize_extension(extension)?;
    if let Some(mime) = EXT_TO_MIME.get(ext.as_str()) {
        return Some((*mime).to_string());
    }
    mime_guess::from_ext(ext.trim_start_matches('.'))
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Generic extension lookup for a MIME type, restricted to supported extensions.
pub fn guess_extension_from_mime(mime_type: &str) -> Option<&'static str> {
    if let Some(ext) = extension_for(mime_type) {
        return Some(ext);
    }

    let normalized = normalize_mime(mime_type);
    mime_guess::get_mime_extensions_str(&normalized)?
        .iter()
        .filter_map(|candidate| normalize_extension(candidate))
        .find_map(|candidate| SUPPORTED_EXTENSIONS.get(candidate.as_str()).copied())
}
