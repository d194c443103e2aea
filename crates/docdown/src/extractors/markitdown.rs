//! Generic document conversion through an external `markitdown` process.

use crate::core::config::ConverterConfig;
use crate::plugins::{DocumentConverter, Plugin};
use crate::{DocdownError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

/// Runs `<command> [args..] <path>` and takes stdout as the Markdown.
///
/// A non-zero exit status, a spawn failure and a timeout are all reported as
/// `ConversionFailed`. The child is killed if the timeout elapses.
#[derive(Debug, Clone)]
pub struct MarkItDownConverter {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl MarkItDownConverter {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone(), config.timeout())
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for MarkItDownConverter {
    fn default() -> Self {
        Self::from_config(&ConverterConfig::default())
    }
}

impl Plugin for MarkItDownConverter {
    fn name(&self) -> &str {
        "markitdown"
    }
}

#[async_trait]
impl DocumentConverter for MarkItDownConverter {
    async fn convert_file(&self, path: &Path, extension: &str) -> Result<String> {
        tracing::debug!(command = %self.command, path = %path.display(), extension, "Running document converter");

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DocdownError::conversion_failed_with_source(format!("Failed to execute {}", self.command), e))?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(DocdownError::conversion_failed_with_source(
                    format!("Failed to wait for {}", self.command),
                    e,
                ));
            }
            Err(_) => {
                return Err(DocdownError::conversion_failed(format!(
                    "{} timed out after {} seconds",
                    self.command,
                    self.timeout.as_secs_f64()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocdownError::conversion_failed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            DocdownError::conversion_failed_with_source(format!("{} produced non UTF-8 output", self.command), e)
        })
    }
}
