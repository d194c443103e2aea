//! `html-to-markdown-rs` backed HTML strategies.

use crate::Result;
use crate::extraction::html::{convert_html_to_markdown, fragment_options, structured_options};
use crate::plugins::{MarkdownRenderer, Plugin, StructuredExtractor};

/// Whole-page extraction with preprocessing (navigation and forms removed).
///
/// Whitespace-only output counts as nothing extracted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToMarkdownExtractor;

impl Plugin for HtmlToMarkdownExtractor {
    fn name(&self) -> &str {
        "html-to-markdown"
    }
}

impl StructuredExtractor for HtmlToMarkdownExtractor {
    fn extract(&self, html: &str) -> Result<Option<String>> {
        let markdown = convert_html_to_markdown(html, structured_options())?;
        if markdown.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(markdown))
        }
    }
}

/// Renders cleaned fragments with ATX headings and no preprocessing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToMarkdownRenderer;

impl Plugin for HtmlToMarkdownRenderer {
    fn name(&self) -> &str {
        "html-to-markdown-renderer"
    }
}

impl MarkdownRenderer for HtmlToMarkdownRenderer {
    fn render(&self, html_fragment: &str) -> Result<String> {
        convert_html_to_markdown(html_fragment, fragment_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_extraction() {
        let html = "<html><head><title>T</title></head><body><h1>Heading</h1><p>Paragraph</p></body></html>";
        let markdown = HtmlToMarkdownExtractor.extract(html).unwrap().unwrap();
        assert!(markdown.contains("Heading"));
        assert!(markdown.contains("Paragraph"));
    }

    #[test]
    fn test_empty_page_extracts_nothing() {
        assert_eq!(HtmlToMarkdownExtractor.extract("<html><body></body></html>").unwrap(), None);
    }

    #[test]
    fn test_renderer_preserves_images() {
        let markdown = HtmlToMarkdownRenderer
            .render(r#"<p><img src="cat.png" alt="A cat"></p>"#)
            .unwrap();
        assert!(markdown.contains("![A cat](cat.png)"));
    }
}
