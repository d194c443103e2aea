//! Core detection and configuration.
//!
//! - [`mime`]: extension/MIME registry
//! - [`formats`]: the [`Format`](formats::Format) variant shared by sniffer and dispatcher
//! - [`sniff`]: byte-level content sniffing
//! - [`resolve`]: header, origin and sniffed evidence combined into one type
//! - [`config`]: layered service configuration
//! - [`io`]: scoped temporary input files

pub mod config;
pub mod formats;
pub mod io;
pub mod mime;
pub mod resolve;
pub mod sniff;

pub use config::{ConverterConfig, ServiceConfig};
pub use formats::Format;
pub use resolve::{resolve, resolve_hints};
