//! Conversion dispatch.
//!
//! [`Converter`] takes content plus its [`ResolvedType`] and picks a branch:
//!
//! - HTML goes through the [`HtmlPipeline`](html::HtmlPipeline): structured
//!   extraction, then the readability fallback. The pipeline is CPU-bound and
//!   runs on tokio's blocking pool.
//! - Every other supported format goes to the [`DocumentConverter`] through a
//!   scoped temp file.
//! - Anything else is `UnsupportedFormat`.
//!
//! # Example
//!
//! ```rust,no_run
//! use docdown::{ConverterConfig, Converter, resolve};
//!
//! # async fn example() -> docdown::Result<()> {
//! let converter = Converter::with_defaults(&ConverterConfig::default());
//! let content = b"<html><head><title>Hi</title></head><body><p>Hello</p></body></html>";
//! let resolved = resolve(content, None, None);
//! let outcome = converter.convert(content, &resolved).await?;
//! println!("{} via {}", outcome.markdown, outcome.method());
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod html;

use crate::core::config::ConverterConfig;
use crate::core::formats::Format;
use crate::extractors::{
    ChardetngDetector, HtmlToMarkdownExtractor, HtmlToMarkdownRenderer, MainContentExtractor, MarkItDownConverter,
};
use crate::plugins::{DocumentConverter, EncodingDetector, MarkdownRenderer, ReadabilityExtractor, StructuredExtractor};
use crate::types::{ConversionMetadata, ConversionMethod, ConversionOutcome, ResolvedType};
use crate::{DocdownError, Result};
use html::{HtmlPipeline, HtmlStage, ReadabilityStage, StructuredStage};
use std::sync::Arc;
use std::time::Instant;

/// Dispatches resolved content to a conversion strategy.
///
/// Holds only shared, stateless strategies; wrap in `Arc` and share across
/// requests.
pub struct Converter {
    document: Arc<dyn DocumentConverter>,
    html: Arc<HtmlPipeline>,
}

impl Converter {
    /// Build a converter from explicit strategies, with the standard two-stage
    /// HTML pipeline.
    pub fn new(
        document: Arc<dyn DocumentConverter>,
        structured: Arc<dyn StructuredExtractor>,
        readability: Arc<dyn ReadabilityExtractor>,
        renderer: Arc<dyn MarkdownRenderer>,
        detector: Arc<dyn EncodingDetector>,
    ) -> Self {
        let stages: Vec<Box<dyn HtmlStage>> = vec![
            Box::new(StructuredStage::new(structured)),
            Box::new(ReadabilityStage::new(readability, renderer, detector)),
        ];
        Self::with_pipeline(document, HtmlPipeline::new(stages))
    }

    /// Build a converter around a custom HTML pipeline.
    pub fn with_pipeline(document: Arc<dyn DocumentConverter>, html: HtmlPipeline) -> Self {
        Self {
            document,
            html: Arc::new(html),
        }
    }

    /// Default backends: `markitdown` subprocess, `html-to-markdown-rs`,
    /// regex main-content extraction and `chardetng`.
    pub fn with_defaults(config: &ConverterConfig) -> Self {
        Self::new(
            Arc::new(MarkItDownConverter::from_config(config)),
            Arc::new(HtmlToMarkdownExtractor),
            Arc::new(MainContentExtractor),
            Arc::new(HtmlToMarkdownRenderer),
            Arc::new(ChardetngDetector),
        )
    }

    /// Convert `content` of the given resolved type to Markdown.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` when the type is neither HTML nor supported
    /// - `ExtractionFailed` when the HTML pipeline fails or is exhausted
    /// - `ConversionFailed` when the document converter fails
    pub async fn convert(&self, content: &[u8], resolved: &ResolvedType) -> Result<ConversionOutcome> {
        let format = Format::from_resolved(resolved).ok_or_else(|| {
            tracing::debug!(resolved = %resolved, "No converter for resolved type");
            DocdownError::UnsupportedFormat(unsupported_label(resolved))
        })?;

        let start = Instant::now();
        let (markdown, method) = if format.is_html() {
            self.convert_html_blocking(content).await?
        } else {
            let extension = if resolved.has_extension() {
                resolved.extension.as_str()
            } else {
                format.extension()
            };
            let markdown = document::convert_document(self.document.as_ref(), content, extension).await?;
            (markdown, ConversionMethod::GenericDocument)
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        let metadata = ConversionMetadata {
            method,
            mime_type: resolved.mime_type.clone(),
            extension: if resolved.has_extension() {
                resolved.extension.clone()
            } else {
                format.extension().to_string()
            },
            source_bytes: content.len(),
            markdown_chars: markdown.chars().count(),
            duration_ms,
        };

        tracing::info!(
            method = %metadata.method,
            mime_type = %metadata.mime_type,
            source_bytes = metadata.source_bytes,
            markdown_chars = metadata.markdown_chars,
            duration_ms,
            "Conversion complete"
        );

        Ok(ConversionOutcome { markdown, metadata })
    }

    /// Run the HTML pipeline on the current thread.
    pub fn convert_html(&self, content: &[u8]) -> Result<(String, ConversionMethod)> {
        self.html.run(content)
    }

    async fn convert_html_blocking(&self, content: &[u8]) -> Result<(String, ConversionMethod)> {
        let pipeline = Arc::clone(&self.html);
        let owned = content.to_vec();
        tokio::task::spawn_blocking(move || pipeline.run(&owned))
            .await
            .map_err(|e| DocdownError::extraction_failed_with_source("HTML extraction task failed", e))?
    }
}

fn unsupported_label(resolved: &ResolvedType) -> String {
    if resolved.has_extension() {
        resolved.extension.clone()
    } else {
        resolved.mime_type.clone()
    }
}
