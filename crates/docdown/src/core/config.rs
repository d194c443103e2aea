//! Service configuration.
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`ServiceConfig::default`]).
//! 2. A TOML file: an explicit path, or `docdown.toml` discovered in the
//!    current directory or any parent.
//! 3. Environment variables (`API_KEY`, `VERSION`, `MAX_DOWNLOAD_SIZE`,
//!    `TIMEOUT_SECONDS`, `DOCDOWN_HOST`, `DOCDOWN_PORT`, `DOCDOWN_CONVERTER`).
//!
//! # Example
//!
//! ```rust
//! use docdown::ServiceConfig;
//!
//! let config: ServiceConfig = toml::from_str(r#"
//!     port = 9000
//!
//!     [converter]
//!     command = "/usr/local/bin/markitdown"
//! "#).unwrap();
//!
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.max_upload_bytes, 52_428_800);
//! assert_eq!(config.converter.timeout_secs, 120);
//! ```

use crate::{DocdownError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// File name searched for by [`ServiceConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "docdown.toml";

/// Shared secret accepted when none is configured.
pub const DEFAULT_API_KEY: &str = "DEFAULT_API_KEY_FOR_MARKITDOWN_API";

/// Default upload and download cap (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 52_428_800;

/// HTTP service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Interface to bind.
    pub host: String,
    pub port: u16,
    /// Shared secret for `X-API-Key` / `Authorization: Bearer`.
    pub api_key: String,
    /// Maximum accepted upload or download size in bytes.
    pub max_upload_bytes: usize,
    /// Timeout for fetching a remote URL, in seconds.
    pub fetch_timeout_secs: u64,
    /// Version reported by `/health`.
    pub version: String,
    pub converter: ConverterConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_key: DEFAULT_API_KEY.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            fetch_timeout_secs: 30,
            version: env!("CARGO_PKG_VERSION").to_string(),
            converter: ConverterConfig::default(),
        }
    }
}

/// External document converter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Program invoked with the input path as its last argument.
    pub command: String,
    /// Extra arguments placed before the input path.
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: "markitdown".to_string(),
            args: Vec::new(),
            timeout_secs: 120,
        }
    }
}

impl ConverterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DocdownError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| DocdownError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Discover `docdown.toml` in the current directory or its parents.
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(DocdownError::Io)?;
        Self::discover_from(&current)
    }

    /// Discover `docdown.toml` starting at `start` and walking up.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
        }
        Ok(None)
    }

    /// Build the effective configuration: defaults, then the file (explicit or
    /// discovered), then the environment. The result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::discover()?.unwrap_or_default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override fields from process environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override fields from an arbitrary variable lookup.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY") {
            self.api_key = key;
        }
        if let Some(version) = lookup("VERSION") {
            self.version = version;
        }
        if let Some(host) = lookup("DOCDOWN_HOST") {
            self.host = host;
        }
        if let Some(command) = lookup("DOCDOWN_CONVERTER") {
            self.converter.command = command;
        }
        if let Some(bytes) = parse_var::<usize, _>(&lookup, "MAX_DOWNLOAD_SIZE") {
            tracing::info!(
                "Upload size limit configured from environment: {} bytes ({:.1} MB)",
                bytes,
                bytes as f64 / (1024.0 * 1024.0)
            );
            self.max_upload_bytes = bytes;
        }
        if let Some(secs) = parse_var(&lookup, "TIMEOUT_SECONDS") {
            self.fetch_timeout_secs = secs;
        }
        if let Some(port) = parse_var(&lookup, "DOCDOWN_PORT") {
            self.port = port;
        }
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(DocdownError::validation("api_key must not be empty"));
        }
        if self.max_upload_bytes == 0 {
            return Err(DocdownError::validation("max_upload_bytes must be greater than 0"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(DocdownError::validation("fetch_timeout_secs must be greater than 0"));
        }
        if self.converter.timeout_secs == 0 {
            return Err(DocdownError::validation("converter.timeout_secs must be greater than 0"));
        }
        if self.converter.command.trim().is_empty() {
            return Err(DocdownError::validation("converter.command must not be empty"));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| DocdownError::validation_with_source(format!("Invalid host '{}'", self.host), e))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Failed to parse {}='{}', keeping configured value", name, value);
            None
        }
    }
}
