//! HTML strategy traits.
//!
//! These are synchronous: HTML extraction is CPU work and the HTTP layer runs
//! the whole HTML branch on a blocking thread.

use crate::Result;
use crate::plugins::Plugin;

/// Output of a readability pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readable {
    /// Document title, if one was found.
    pub title: Option<String>,
    /// Cleaned HTML fragment holding the main content.
    pub content_html: String,
}

/// Structured web-content extraction straight to Markdown.
///
/// `Ok(None)` means the extractor found nothing usable; the dispatcher then
/// moves on to the readability fallback.
pub trait StructuredExtractor: Plugin {
    fn extract(&self, html: &str) -> Result<Option<String>>;
}

/// Main-content extraction from raw HTML bytes.
pub trait ReadabilityExtractor: Plugin {
    /// Extract the title and the main content fragment.
    ///
    /// `encoding` is a WHATWG encoding label such as `"utf-8"` or
    /// `"windows-1252"`.
    fn extract(&self, html: &[u8], encoding: &str) -> Result<Readable>;
}

/// HTML fragment to Markdown, preserving links, images and tables.
pub trait MarkdownRenderer: Plugin {
    fn render(&self, html_fragment: &str) -> Result<String>;
}

/// Character encoding detection over a byte sample.
pub trait EncodingDetector: Plugin {
    /// Returns a WHATWG encoding label.
    fn detect(&self, sample: &[u8]) -> &'static str;
}
