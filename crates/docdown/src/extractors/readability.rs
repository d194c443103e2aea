//! Main-content extraction for the readability fallback.
//!
//! A lightweight, regex-driven cleaner: it decodes the page with the detected
//! encoding, reads `<title>`, removes boilerplate elements and keeps the most
//! specific content region (`<article>`, then `<main>`, then `<body>`, then
//! the whole document).

use crate::Result;
use crate::plugins::{Plugin, Readable, ReadabilityExtractor};
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;

/// Elements removed together with their content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
];

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid title regex"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static BOILERPLATE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    BOILERPLATE_TAGS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).expect("valid boilerplate regex"))
        .collect()
});

static REGION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["article", "main", "body"]
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>(.*)</{tag}\s*>")).expect("valid region regex"))
        .collect()
});

/// Title plus cleaned main region of an HTML page.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainContentExtractor;

impl Plugin for MainContentExtractor {
    fn name(&self) -> &str {
        "main-content"
    }
}

impl ReadabilityExtractor for MainContentExtractor {
    fn extract(&self, html: &[u8], encoding: &str) -> Result<Readable> {
        let encoding = Encoding::for_label(encoding.as_bytes()).unwrap_or_else(|| {
            tracing::warn!(encoding, "Unknown encoding label, decoding as UTF-8");
            UTF_8
        });
        let (text, _, had_errors) = encoding.decode(html);
        if had_errors {
            tracing::debug!(encoding = encoding.name(), "Malformed sequences replaced while decoding HTML");
        }

        let title = extract_title(&text);

        let mut cleaned = COMMENT_RE.replace_all(&text, "").into_owned();
        for re in BOILERPLATE_RES.iter() {
            cleaned = re.replace_all(&cleaned, "").into_owned();
        }

        let content_html = REGION_RES
            .iter()
            .find_map(|re| re.captures(&cleaned).and_then(|caps| caps.get(1)))
            .map(|region| region.as_str())
            .unwrap_or(cleaned.as_str())
            .trim()
            .to_string();

        Ok(Readable { title, content_html })
    }
}

fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let text = TAG_RE.replace_all(raw, "");
    let title = WHITESPACE_RE.replace_all(&decode_basic_entities(&text), " ").trim().to_string();
    if title.is_empty() { None } else { Some(title) }
}

fn decode_basic_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
