//! Default backends for the plugin traits.
//!
//! | Backend | Trait |
//! |---|---|
//! | [`MarkItDownConverter`] | [`DocumentConverter`](crate::plugins::DocumentConverter) |
//! | [`HtmlToMarkdownExtractor`] | [`StructuredExtractor`](crate::plugins::StructuredExtractor) |
//! | [`MainContentExtractor`] | [`ReadabilityExtractor`](crate::plugins::ReadabilityExtractor) |
//! | [`HtmlToMarkdownRenderer`] | [`MarkdownRenderer`](crate::plugins::MarkdownRenderer) |
//! | [`ChardetngDetector`] | [`EncodingDetector`](crate::plugins::EncodingDetector) |

pub mod encoding;
pub mod html;
pub mod markitdown;
pub mod readability;

pub use encoding::ChardetngDetector;
pub use html::{HtmlToMarkdownExtractor, HtmlToMarkdownRenderer};
pub use markitdown::MarkItDownConverter;
pub use readability::MainContentExtractor;
