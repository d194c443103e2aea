//! API request and response types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{Converter, DocdownError, Result, ServiceConfig, types::SourceHints};

/// Request body overhead allowed on top of the upload limit for multipart
/// framing and the `url` field.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type name
    pub error_type: String,
    pub message: String,
    pub status_code: u16,
}

/// Conversion response: `{result, metadata}`.
pub type ConvertResponse = crate::types::ConversionOutcome;

/// API server state.
///
/// Everything in here is shared read-only across requests.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<ServiceConfig>,
    pub converter: Arc<Converter>,
    pub http: reqwest::Client,
}

impl ApiState {
    /// State with the default conversion backends.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let converter = Converter::with_defaults(&config.converter);
        Self::with_converter(config, converter)
    }

    /// State with a caller-supplied converter.
    pub fn with_converter(config: ServiceConfig, converter: Converter) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("docdown/", env!("CARGO_PKG_VERSION")))
            .timeout(config.fetch_timeout())
            .build()
            .map_err(|e| DocdownError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            converter: Arc::new(converter),
            http,
        })
    }

    /// Total request body limit enforced by the router.
    pub fn body_limit(&self) -> usize {
        self.config.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

/// An uploaded file from the `file` form field.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// The raw `/convert` form, before exclusivity is checked.
#[derive(Debug, Default)]
pub struct ConvertForm {
    pub file: Option<Upload>,
    pub url: Option<String>,
}

/// A validated `/convert` input: exactly one source.
#[derive(Debug)]
pub enum ConvertInput {
    File(Upload),
    Url(String),
}

impl ConvertForm {
    /// Enforce that exactly one of `file` and `url` was sent.
    pub fn into_input(self) -> Result<ConvertInput> {
        match (self.file, self.url) {
            (Some(file), None) => Ok(ConvertInput::File(file)),
            (None, Some(url)) => Ok(ConvertInput::Url(url)),
            (None, None) => Err(DocdownError::validation("Either file or url must be provided")),
            (Some(_), Some(_)) => Err(DocdownError::validation("Only one of file or url should be provided")),
        }
    }
}

impl Upload {
    pub fn hints(&self) -> SourceHints {
        SourceHints {
            declared_mime: self.content_type.clone(),
            origin: self.filename.clone(),
        }
    }
}
