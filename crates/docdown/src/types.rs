use serde::{Deserialize, Serialize};
use std::fmt;

/// Hints about where content came from.
///
/// Neither field is trusted on its own: the resolver cross-checks both against
/// the registry and the content bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceHints {
    /// MIME type declared by an HTTP header or upload metadata.
    pub declared_mime: Option<String>,
    /// URL or filename the content came from; only its extension is used.
    pub origin: Option<String>,
}

impl SourceHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.declared_mime = Some(mime.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Authoritative content type decided by the resolver.
///
/// `extension` starts with a dot or is empty. A non-empty extension is always
/// a member of the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedType {
    pub mime_type: String,
    pub extension: String,
}

impl ResolvedType {
    pub fn new(mime_type: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            extension: extension.into(),
        }
    }

    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extension.is_empty() {
            write!(f, "{}", self.mime_type)
        } else {
            write!(f, "{} ({})", self.mime_type, self.extension)
        }
    }
}

/// Which converter produced the Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionMethod {
    GenericDocument,
    StructuredExtraction,
    ReadabilityFallback,
}

impl ConversionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionMethod::GenericDocument => "generic-document",
            ConversionMethod::StructuredExtraction => "structured-extraction",
            ConversionMethod::ReadabilityFallback => "readability-fallback",
        }
    }
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionMetadata {
    pub method: ConversionMethod,
    pub mime_type: String,
    pub extension: String,
    pub source_bytes: usize,
    pub markdown_chars: usize,
    pub duration_ms: u64,
}

/// Result of one conversion: Markdown plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    #[serde(rename = "result")]
    pub markdown: String,
    pub metadata: ConversionMetadata,
}

impl ConversionOutcome {
    pub fn method(&self) -> ConversionMethod {
        self.metadata.method
    }
}
