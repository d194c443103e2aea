//! Error types for docdown.
//!
//! Every fallible operation in the crate returns [`DocdownError`]. The variants
//! map onto the three outcomes callers must tell apart:
//!
//! - `UnsupportedFormat` - the input resolved to a type no converter handles (client error)
//! - `ExtractionFailed` - every HTML extraction stage failed or produced nothing (server error)
//! - `ConversionFailed` - the generic document converter failed (server error)
//!
//! The remaining variants belong to the ingress layer (validation, fetching,
//! size limits, authentication) or bubble up from the system (`Io`).
//!
//! # Example
//!
//! ```rust
//! use docdown::{DocdownError, Result};
//!
//! fn require_content(content: &[u8]) -> Result<()> {
//!     if content.is_empty() {
//!         return Err(DocdownError::validation("Content is empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_content(b"").is_err());
//! ```
use thiserror::Error;

/// Result type alias using `DocdownError`.
pub type Result<T> = std::result::Result<T, DocdownError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all docdown operations.
#[derive(Debug, Error)]
pub enum DocdownError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Conversion failed: {message}")]
    ConversionFailed {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Payload too large: {actual} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize, actual: usize },

    #[error("Invalid authentication credentials")]
    Unauthorized,

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DocdownError {
    fn from(err: serde_json::Error) -> Self {
        DocdownError::Validation {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DocdownError {
    error_constructor!(extraction_failed, ExtractionFailed);
    error_constructor!(conversion_failed, ConversionFailed);
    error_constructor!(validation, Validation);
    error_constructor!(fetch, Fetch);

    /// Short machine-readable name of the variant, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DocdownError::Io(_) => "IoError",
            DocdownError::UnsupportedFormat(_) => "UnsupportedFormat",
            DocdownError::ExtractionFailed { .. } => "ExtractionFailed",
            DocdownError::ConversionFailed { .. } => "ConversionFailed",
            DocdownError::Validation { .. } => "ValidationError",
            DocdownError::Fetch { .. } => "FetchError",
            DocdownError::Timeout(_) => "Timeout",
            DocdownError::PayloadTooLarge { .. } => "PayloadTooLarge",
            DocdownError::Unauthorized => "Unauthorized",
            DocdownError::Other(_) => "InternalError",
        }
    }
}
