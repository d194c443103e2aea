//! Content-type resolution.
//!
//! Combines the declared MIME type, the origin's file extension and content
//! sniffing into one authoritative [`ResolvedType`]. Every step only fills
//! whichever of (MIME, extension) is still unknown, so earlier and more
//! explicit evidence always wins over later guesses.

use crate::core::mime::{self, OCTET_STREAM_MIME_TYPE};
use crate::core::sniff;
use crate::types::{ResolvedType, SourceHints};
use std::path::Path;

/// Resolve the content type of `content`.
///
/// Resolution order:
///
/// 1. The declared MIME type, normalized and mapped through the registry.
///    `application/octet-stream` counts as undeclared.
/// 2. The extension of the origin's final path segment, if supported.
/// 3. The sniffer, for whatever is still unknown.
/// 4. Generic `mime_guess` lookups to fill one field from the other.
/// 5. `application/octet-stream` when the MIME type is still unknown.
///
/// Never fails: an undetermined type comes back as
/// `application/octet-stream` with an empty extension.
pub fn resolve(content: &[u8], declared_mime: Option<&str>, origin: Option<&str>) -> ResolvedType {
    let mut mime_type: Option<String> = None;
    let mut extension: Option<String> = None;

    if let Some(declared) = declared_mime.filter(|declared| !mime::is_opaque_mime(declared)) {
        let normalized = mime::normalize_mime(declared);
        extension = mime::extension_for(&normalized).map(str::to_string);
        tracing::debug!(
            declared = %normalized,
            extension = extension.as_deref().unwrap_or(""),
            "Resolved from declared MIME type"
        );
        mime_type = Some(normalized);
    }

    if extension.is_none()
        && let Some(origin_ext) = origin.and_then(extension_from_origin)
    {
        if mime::is_supported(&origin_ext) {
            tracing::debug!(extension = %origin_ext, "Resolved extension from origin");
            if mime_type.is_none() {
                mime_type = mime::mime_for(&origin_ext).map(str::to_string);
            }
            extension = Some(origin_ext);
        } else {
            tracing::debug!(extension = %origin_ext, "Ignoring unsupported origin extension");
        }
    }

    if (mime_type.is_none() || extension.is_none())
        && !content.is_empty()
        && let Some(format) = sniff::sniff(content)
    {
        tracing::debug!(format = %format, "Sniffed content");
        if extension.is_none() {
            extension = Some(format.extension().to_string());
        }
        if mime_type.is_none() {
            mime_type = Some(format.mime_type().to_string());
        }
    }

    if mime_type.is_none()
        && let Some(ext) = extension.as_deref()
    {
        mime_type = mime::guess_mime_from_extension(ext);
    } else if extension.is_none()
        && let Some(declared) = mime_type.as_deref()
    {
        extension = mime::guess_extension_from_mime(declared).map(str::to_string);
    }

    let resolved = ResolvedType::new(
        mime_type.unwrap_or_else(|| OCTET_STREAM_MIME_TYPE.to_string()),
        extension.unwrap_or_default(),
    );
    tracing::debug!(mime_type = %resolved.mime_type, extension = %resolved.extension, "Resolved content type");
    resolved
}

/// [`resolve`] with the hints bundled as [`SourceHints`].
pub fn resolve_hints(content: &[u8], hints: &SourceHints) -> ResolvedType {
    resolve(content, hints.declared_mime.as_deref(), hints.origin.as_deref())
}

/// Extension of the final path segment of a URL or filename.
///
/// URLs go through [`url::Url`], so query strings, fragments and userinfo never
/// leak into the segment; a bare host has no extension. Anything that does not
/// parse as a hierarchical URL (bare filenames, Windows paths) is read as a
/// path. The result is normalized (lowercase, leading dot) but not checked
/// against the supported set.
pub fn extension_from_origin(origin: &str) -> Option<String> {
    if let Ok(parsed) = url::Url::parse(origin)
        && let Some(segments) = parsed.path_segments()
    {
        let segment = segments.filter(|segment| !segment.is_empty()).next_back()?;
        return extension_of(segment);
    }

    let path = origin.split(['#', '?']).next().unwrap_or_default();
    extension_of(path.rsplit(['/', '\\']).next().unwrap_or_default())
}

fn extension_of(segment: &str) -> Option<String> {
    let extension = Path::new(segment).extension()?.to_str()?;
    mime::normalize_extension(extension)
}
