//! HTML to Markdown conversion through `html-to-markdown-rs`.
//!
//! Two option presets are used by the default backends:
//!
//! - [`structured_options`]: preprocessing on, navigation and forms dropped.
//!   Used for direct structured extraction of whole pages.
//! - [`fragment_options`]: preprocessing off. Used to render an already
//!   cleaned main-content fragment.
//!
//! Large documents are converted on a dedicated thread with a bigger stack;
//! a panic inside the converter is turned into an error either way.
//!
//! # Example
//!
//! ```rust
//! use docdown::extraction::html::{convert_html_to_markdown, fragment_options};
//!
//! # fn example() -> docdown::Result<()> {
//! let markdown = convert_html_to_markdown("<h1>Title</h1><p>Some <strong>bold</strong> text.</p>", fragment_options())?;
//! assert!(markdown.contains("# Title"));
//! assert!(markdown.contains("**bold**"));
//! # Ok(())
//! # }
//! ```
use crate::error::{DocdownError, Result};
use html_to_markdown_rs::{ConversionOptions, convert as convert_html};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

pub use html_to_markdown_rs::{HeadingStyle, PreprocessingOptions, PreprocessingPreset};

const LARGE_HTML_STACK_THRESHOLD_BYTES: usize = 512 * 1024;
const HTML_CONVERSION_STACK_SIZE_BYTES: usize = 16 * 1024 * 1024;

/// Options for whole-page structured extraction.
pub fn structured_options() -> ConversionOptions {
    ConversionOptions {
        heading_style: HeadingStyle::Atx,
        extract_metadata: false,
        preprocessing: PreprocessingOptions {
            enabled: true,
            preset: PreprocessingPreset::Standard,
            remove_navigation: true,
            remove_forms: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Options for rendering a cleaned fragment.
pub fn fragment_options() -> ConversionOptions {
    ConversionOptions {
        heading_style: HeadingStyle::Atx,
        extract_metadata: false,
        preprocessing: PreprocessingOptions {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Convert HTML to Markdown.
///
/// # Errors
///
/// `ExtractionFailed` when the converter reports an error or panics.
pub fn convert_html_to_markdown(html: &str, options: ConversionOptions) -> Result<String> {
    if html.len() >= LARGE_HTML_STACK_THRESHOLD_BYTES {
        let owned = html.to_string();
        run_on_dedicated_stack(move || convert_catching_panics(&owned, options))
    } else {
        convert_catching_panics(html, options)
    }
}

fn convert_catching_panics(html: &str, options: ConversionOptions) -> Result<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| convert_html(html, Some(options)))) {
        Ok(Ok(markdown)) => Ok(markdown),
        Ok(Err(e)) => Err(DocdownError::extraction_failed(format!(
            "Failed to convert HTML to Markdown: {}",
            e
        ))),
        Err(panic) => Err(DocdownError::extraction_failed(format!(
            "HTML conversion panicked: {}",
            panic_reason(panic.as_ref())
        ))),
    }
}

fn run_on_dedicated_stack<T, F>(job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("docdown-html-conversion".to_string())
        .stack_size(HTML_CONVERSION_STACK_SIZE_BYTES)
        .spawn(job)
        .map_err(|err| DocdownError::Other(format!("Failed to spawn HTML conversion thread: {}", err)))?;

    match handle.join() {
        Ok(result) => result,
        Err(panic) => Err(DocdownError::extraction_failed(format!(
            "HTML conversion panicked: {}",
            panic_reason(panic.as_ref())
        ))),
    }
}

/// Best-effort message from a panic payload.
pub(crate) fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
