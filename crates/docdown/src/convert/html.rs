//! HTML branch: ordered extraction stages with fault isolation.
//!
//! Each stage returns `Ok(Some(markdown))` to finish, `Ok(None)` to hand over
//! to the next stage, or an error. Errors and panics stop the pipeline and are
//! reported as a single `ExtractionFailed`; running out of stages is also
//! `ExtractionFailed`.

use crate::core::sniff::decode_lenient;
use crate::extraction::html::panic_reason;
use crate::plugins::{EncodingDetector, MarkdownRenderer, ReadabilityExtractor, StructuredExtractor};
use crate::types::ConversionMethod;
use crate::{DocdownError, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Bytes handed to the encoding detector.
pub const ENCODING_SAMPLE_BYTES: usize = 64 * 1024;

/// One strategy in the HTML pipeline.
pub trait HtmlStage: Send + Sync {
    /// Method recorded when this stage produces the result.
    fn method(&self) -> ConversionMethod;

    fn run(&self, content: &[u8]) -> Result<Option<String>>;
}

/// Structured extraction over leniently decoded text.
pub struct StructuredStage {
    extractor: Arc<dyn StructuredExtractor>,
}

impl StructuredStage {
    pub fn new(extractor: Arc<dyn StructuredExtractor>) -> Self {
        Self { extractor }
    }
}

impl HtmlStage for StructuredStage {
    fn method(&self) -> ConversionMethod {
        ConversionMethod::StructuredExtraction
    }

    fn run(&self, content: &[u8]) -> Result<Option<String>> {
        let text = decode_lenient(content);
        Ok(self
            .extractor
            .extract(&text)?
            .filter(|markdown| !markdown.trim().is_empty()))
    }
}

/// Encoding detection, main-content extraction, then rendering.
///
/// The page title, when present, becomes a leading `# ` heading.
pub struct ReadabilityStage {
    extractor: Arc<dyn ReadabilityExtractor>,
    renderer: Arc<dyn MarkdownRenderer>,
    detector: Arc<dyn EncodingDetector>,
}

impl ReadabilityStage {
    pub fn new(
        extractor: Arc<dyn ReadabilityExtractor>,
        renderer: Arc<dyn MarkdownRenderer>,
        detector: Arc<dyn EncodingDetector>,
    ) -> Self {
        Self {
            extractor,
            renderer,
            detector,
        }
    }
}

impl HtmlStage for ReadabilityStage {
    fn method(&self) -> ConversionMethod {
        ConversionMethod::ReadabilityFallback
    }

    fn run(&self, content: &[u8]) -> Result<Option<String>> {
        let sample = &content[..content.len().min(ENCODING_SAMPLE_BYTES)];
        let encoding = self.detector.detect(sample);
        tracing::debug!(encoding, detector = self.detector.name(), "Detected HTML encoding");

        let readable = self.extractor.extract(content, encoding)?;
        let body = if readable.content_html.trim().is_empty() {
            String::new()
        } else {
            self.renderer.render(&readable.content_html)?
        };

        let markdown = match readable.title {
            Some(title) => format!("# {}\n\n{}", title, body),
            None => body,
        };

        if markdown.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(markdown))
        }
    }
}

/// Ordered HTML stages, first non-empty result wins.
pub struct HtmlPipeline {
    stages: Vec<Box<dyn HtmlStage>>,
}

impl HtmlPipeline {
    pub fn new(stages: Vec<Box<dyn HtmlStage>>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the stages in order.
    pub fn run(&self, content: &[u8]) -> Result<(String, ConversionMethod)> {
        for stage in &self.stages {
            let method = stage.method();
            tracing::debug!(method = %method, "Running HTML stage");

            match panic::catch_unwind(AssertUnwindSafe(|| stage.run(content))) {
                Ok(Ok(Some(markdown))) => return Ok((markdown, method)),
                Ok(Ok(None)) => {
                    tracing::warn!(method = %method, "HTML stage produced no content, falling back");
                }
                Ok(Err(e)) => {
                    return Err(DocdownError::extraction_failed_with_source(
                        format!("{} stage failed", method),
                        e,
                    ));
                }
                Err(panic) => {
                    return Err(DocdownError::extraction_failed(format!(
                        "{} stage panicked: {}",
                        method,
                        panic_reason(panic.as_ref())
                    )));
                }
            }
        }

        Err(DocdownError::extraction_failed(
            "No HTML extraction stage produced content",
        ))
    }
}
