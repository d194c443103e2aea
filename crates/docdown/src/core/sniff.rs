//! Content sniffing.
//!
//! Infers a [`Format`] from raw bytes using ordered heuristics; the first rule
//! that matches wins:
//!
//! 1. Magic numbers (`%PDF`, the PNG signature, `FF D8 FF`).
//! 2. ZIP containers, classified by their entry paths (`word/`, `xl/`, `ppt/`).
//! 3. Textual heuristics on a leniently decoded prefix (JSON, HTML, XML, CSV).
//!
//! `None` means "undetermined", never an error: a corrupt archive or binary
//! noise simply falls through every rule.

use crate::core::formats::Format;
use encoding_rs::{Encoding, WINDOWS_1252};
use std::borrow::Cow;
use std::io::Cursor;

/// Bytes decoded for the textual heuristics.
pub const TEXT_SAMPLE_BYTES: usize = 8 * 1024;

/// Characters of decoded text scanned for CSV delimiters.
const CSV_SAMPLE_CHARS: usize = 1024;

const PDF_MAGIC: &[u8] = b"%PDF";
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";
const ZIP_MAGIC: &[u8] = b"PK";

/// Entry prefixes identifying Office Open XML packages, in match order.
const OOXML_PREFIXES: &[(&str, Format)] = &[("word/", Format::Docx), ("xl/", Format::Xlsx), ("ppt/", Format::Pptx)];

/// Infer the format of `content`.
pub fn sniff(content: &[u8]) -> Option<Format> {
    if content.is_empty() {
        return None;
    }

    if let Some(format) = sniff_magic(content) {
        return Some(format);
    }

    if content.starts_with(ZIP_MAGIC)
        && let Some(format) = sniff_zip(content)
    {
        return Some(format);
    }

    let sample = &content[..content.len().min(TEXT_SAMPLE_BYTES)];
    sniff_text(&decode_lenient(sample))
}

fn sniff_magic(content: &[u8]) -> Option<Format> {
    if content.starts_with(PDF_MAGIC) {
        Some(Format::Pdf)
    } else if content.starts_with(PNG_MAGIC) {
        Some(Format::Png)
    } else if content.starts_with(JPEG_MAGIC) {
        Some(Format::Jpeg)
    } else {
        None
    }
}

/// Classify a ZIP container by its entry names.
///
/// The archive is read from memory; a corrupt or foreign archive yields `None`.
pub fn sniff_zip(content: &[u8]) -> Option<Format> {
    let archive = match zip::ZipArchive::new(Cursor::new(content)) {
        Ok(archive) => archive,
        Err(e) => {
            tracing::debug!(error = %e, "PK prefix but not a readable zip archive");
            return None;
        }
    };

    let names: Vec<&str> = archive.file_names().collect();
    OOXML_PREFIXES
        .iter()
        .find(|(prefix, _)| names.iter().any(|name| name.starts_with(prefix)))
        .map(|(_, format)| *format)
}

/// Apply the textual heuristics to already decoded text.
pub fn sniff_text(text: &str) -> Option<Format> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(Format::Json);
    }

    if trimmed.starts_with('<') {
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.contains("<html") || lowered.contains("<!doctype html") {
            return Some(Format::Html);
        }
        return Some(Format::Xml);
    }

    if text.chars().take(CSV_SAMPLE_CHARS).any(|c| c == ',' || c == ';') {
        tracing::debug!("Delimiter heuristic classified content as CSV");
        return Some(Format::Csv);
    }

    None
}

/// Decode bytes to text without ever failing.
///
/// A byte-order mark selects its encoding (UTF-8 or UTF-16). Otherwise the
/// bytes are taken as UTF-8, tolerating a code point cut off at the end of a
/// truncated sample, and anything else is read as windows-1252, which maps
/// every byte.
pub fn decode_lenient(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) if e.error_len().is_none() => {
            let valid = &bytes[..e.valid_up_to()];
            // valid_up_to is a char boundary, so this cannot fail.
            Cow::Borrowed(std::str::from_utf8(valid).unwrap_or_default())
        }
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}
