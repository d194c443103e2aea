//! Generic document branch: temp file in, Markdown out.

use crate::core::io::ScopedInput;
use crate::plugins::{DocumentConverter, Plugin};
use crate::{DocdownError, Result};

/// Write `content` to a scoped temp file with `extension` and convert it.
///
/// The temp file and its directory are gone when this returns, on success and
/// on failure alike.
pub async fn convert_document(converter: &dyn DocumentConverter, content: &[u8], extension: &str) -> Result<String> {
    let input = ScopedInput::create(content, extension).await?;

    let result = converter.convert_file(input.path(), extension).await;
    drop(input);

    result.map_err(|e| match e {
        DocdownError::ConversionFailed { .. } => e,
        other => DocdownError::conversion_failed_with_source(format!("{} converter failed", converter.name()), other),
    })
}
