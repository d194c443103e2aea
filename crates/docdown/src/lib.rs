//! docdown - content-type detection and document-to-Markdown dispatch
//!
//! docdown takes bytes of unknown or misleading origin, decides what kind of
//! document they are, and routes them to the right Markdown converter. An
//! optional axum service (feature `api`) exposes this as an authenticated
//! `/convert` endpoint for uploads and remote URLs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docdown::{Converter, ConverterConfig, resolve};
//!
//! # async fn example() -> docdown::Result<()> {
//! let content = std::fs::read("report.pdf")?;
//! let resolved = resolve(&content, None, Some("report.pdf"));
//!
//! let converter = Converter::with_defaults(&ConverterConfig::default());
//! let outcome = converter.convert(&content, &resolved).await?;
//! println!("{}", outcome.markdown);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): extension/MIME registry, content sniffer, resolver, configuration
//! - **Dispatch** (`convert`): HTML pipeline with fallback, generic document branch
//! - **Plugins** (`plugins`): traits for the external conversion capabilities
//! - **Extractors** (`extractors`): default plugin implementations
//! - **API** (`api`, feature `api`): axum router, auth, URL ingress

#![deny(unsafe_code)]

pub mod convert;
pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod plugins;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{DocdownError, Result};
pub use types::*;

pub use convert::Converter;
pub use core::config::{ConverterConfig, ServiceConfig};
pub use core::formats::Format;
pub use core::mime::{extension_for, is_supported, mime_for};
pub use core::resolve::{resolve, resolve_hints};
pub use core::sniff::sniff;
