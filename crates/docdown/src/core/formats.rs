//! Concrete document formats known to the sniffer and the dispatcher.
//!
//! [`Format`] is the single tagged variant threaded through detection and
//! dispatch. Adding a format means adding one variant here, one arm in
//! [`Format::extension`]/[`Format::mime_type`], and the registry entries in
//! [`crate::core::mime`].
//!
//! # Example
//!
//! ```rust
//! use docdown::core::formats::Format;
//!
//! assert_eq!(Format::from_extension("PDF"), Some(Format::Pdf));
//! assert_eq!(Format::Docx.extension(), ".docx");
//! assert!(Format::Html.is_html());
//! ```

use crate::core::mime::{self, normalize_extension, normalize_mime};
use crate::types::ResolvedType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Pdf,
    Png,
    Jpeg,
    Docx,
    Xlsx,
    Pptx,
    Ppt,
    Json,
    Xml,
    Html,
    Csv,
}

impl Format {
    /// Every format, in registry order.
    pub const ALL: [Format; 11] = [
        Format::Pdf,
        Format::Png,
        Format::Jpeg,
        Format::Docx,
        Format::Xlsx,
        Format::Pptx,
        Format::Ppt,
        Format::Json,
        Format::Xml,
        Format::Html,
        Format::Csv,
    ];

    /// Canonical extension, leading dot included.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pdf => ".pdf",
            Format::Png => ".png",
            Format::Jpeg => ".jpg",
            Format::Docx => ".docx",
            Format::Xlsx => ".xlsx",
            Format::Pptx => ".pptx",
            Format::Ppt => ".ppt",
            Format::Json => ".json",
            Format::Xml => ".xml",
            Format::Html => ".html",
            Format::Csv => ".csv",
        }
    }

    /// Canonical MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Pdf => mime::PDF_MIME_TYPE,
            Format::Png => mime::PNG_MIME_TYPE,
            Format::Jpeg => mime::JPEG_MIME_TYPE,
            Format::Docx => mime::DOCX_MIME_TYPE,
            Format::Xlsx => mime::EXCEL_MIME_TYPE,
            Format::Pptx => mime::POWER_POINT_MIME_TYPE,
            Format::Ppt => mime::LEGACY_POWERPOINT_MIME_TYPE,
            Format::Json => mime::JSON_MIME_TYPE,
            Format::Xml => mime::XML_MIME_TYPE,
            Format::Html => mime::HTML_MIME_TYPE,
            Format::Csv => mime::CSV_MIME_TYPE,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Format::Html)
    }

    /// Look up a format by extension (case-insensitive, dot optional).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match normalize_extension(extension)?.as_str() {
            ".pdf" => Some(Format::Pdf),
            ".png" => Some(Format::Png),
            ".jpg" | ".jpeg" => Some(Format::Jpeg),
            ".docx" => Some(Format::Docx),
            ".xlsx" => Some(Format::Xlsx),
            ".pptx" => Some(Format::Pptx),
            ".ppt" => Some(Format::Ppt),
            ".json" => Some(Format::Json),
            ".xml" => Some(Format::Xml),
            ".html" | ".htm" => Some(Format::Html),
            ".csv" => Some(Format::Csv),
            _ => None,
        }
    }

    /// Look up a format by MIME type through the registry.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        mime::extension_for(mime_type).and_then(Self::from_extension)
    }

    /// Classify a resolved type. The extension decides; the MIME type is only
    /// consulted when no extension was resolved.
    pub fn from_resolved(resolved: &ResolvedType) -> Option<Self> {
        if resolved.has_extension() {
            return Self::from_extension(&resolved.extension);
        }
        Self::from_mime(&normalize_mime(&resolved.mime_type))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension().trim_start_matches('.'))
    }
}
