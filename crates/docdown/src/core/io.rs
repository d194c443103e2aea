//! Scoped temporary input files.
//!
//! External converters read from a path, so raw content is written to a
//! uniquely-named file inside a private temporary directory. [`ScopedInput`]
//! owns both and removes them when dropped, whichever way the conversion ends.

use crate::Result;
use std::path::Path;
use tempfile::{Builder, NamedTempFile, TempDir};

const DIR_PREFIX: &str = "docdown-";
const FILE_PREFIX: &str = "input-";

/// RAII guard for a temporary input file and its directory.
#[derive(Debug)]
pub struct ScopedInput {
    file: Option<NamedTempFile>,
    dir: Option<TempDir>,
}

impl ScopedInput {
    /// Write `content` to a fresh file whose name ends with `extension`.
    pub async fn create(content: &[u8], extension: &str) -> Result<Self> {
        let dir = Builder::new().prefix(DIR_PREFIX).tempdir()?;
        let file = Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(extension)
            .tempfile_in(dir.path())?;

        tokio::fs::write(file.path(), content).await?;
        tracing::debug!(path = %file.path().display(), bytes = content.len(), "Wrote temporary input");

        Ok(Self {
            file: Some(file),
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        match &self.file {
            Some(file) => file.path(),
            None => Path::new(""),
        }
    }

    /// Directory holding the input file.
    pub fn dir(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for ScopedInput {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove temporary input file");
            }
        }
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove temporary directory");
            }
        }
    }
}
