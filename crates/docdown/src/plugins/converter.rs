//! Generic document converter trait.

use crate::Result;
use crate::plugins::Plugin;
use async_trait::async_trait;
use std::path::Path;

/// Converts a document on disk to Markdown.
///
/// Used for every non-HTML format (PDF, Office documents, images, CSV, JSON,
/// XML). Implementations receive a path whose file name ends with the resolved
/// extension, and the extension itself for convenience. The file is removed
/// after the call returns, so implementations must not keep the path.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use docdown::plugins::{DocumentConverter, Plugin};
/// use docdown::Result;
/// use std::path::Path;
///
/// struct Cat;
///
/// impl Plugin for Cat {
///     fn name(&self) -> &str { "cat" }
/// }
///
/// #[async_trait]
/// impl DocumentConverter for Cat {
///     async fn convert_file(&self, path: &Path, _extension: &str) -> Result<String> {
///         Ok(tokio::fs::read_to_string(path).await?)
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentConverter: Plugin {
    /// Convert the file at `path` to Markdown.
    ///
    /// # Errors
    ///
    /// Any error is reported by the dispatcher as `ConversionFailed`.
    async fn convert_file(&self, path: &Path, extension: &str) -> Result<String>;
}
