//! Pluggable conversion backends.
//!
//! The dispatcher never parses documents itself. It drives these traits, and
//! [`crate::extractors`] provides the default implementations. Tests swap in
//! stubs to exercise the dispatch logic without external tools.
//!
//! - [`DocumentConverter`]: file on disk to Markdown (async, may spawn a process)
//! - [`StructuredExtractor`]: HTML text to Markdown, or nothing
//! - [`ReadabilityExtractor`]: HTML bytes to a title and main-content fragment
//! - [`MarkdownRenderer`]: HTML fragment to Markdown
//! - [`EncodingDetector`]: byte sample to encoding label

mod converter;
mod html;
mod traits;

pub use converter::DocumentConverter;
pub use html::{EncodingDetector, MarkdownRenderer, Readable, ReadabilityExtractor, StructuredExtractor};
pub use traits::Plugin;
