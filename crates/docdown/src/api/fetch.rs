//! Remote URL ingress.

use bytes::{Bytes, BytesMut};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use crate::types::SourceHints;
use crate::{DocdownError, Result};

/// Body and hints of a fetched URL.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub content: Bytes,
    pub hints: SourceHints,
}

/// Download `url` with the client's timeout, refusing bodies over `limit`.
///
/// - Only `http` and `https` URLs are accepted.
/// - A timeout anywhere in the exchange is `Timeout`; other transport
///   failures and non-success statuses are `Fetch`.
/// - A declared `Content-Length` above `limit` is rejected before the body is
///   read; the body is also capped while streaming.
///
/// The origin hint is the `Content-Disposition` filename when the server
/// sends one, else the requested URL.
pub async fn fetch_url(client: &reqwest::Client, url: &str, limit: usize) -> Result<Fetched> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| DocdownError::validation_with_source(format!("Invalid url '{}'", url), e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DocdownError::validation(format!(
            "Unsupported url scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }

    tracing::debug!(url = %parsed, "Fetching remote document");
    let response = client.get(parsed).send().await.map_err(transport_error)?;
    let response = response.error_for_status().map_err(transport_error)?;

    if let Some(length) = response.content_length()
        && length > limit as u64
    {
        return Err(DocdownError::PayloadTooLarge {
            limit,
            actual: usize::try_from(length).unwrap_or(usize::MAX),
        });
    }

    let headers = response.headers();
    let declared_mime = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let filename = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_disposition_filename);

    let content = read_capped(response, limit).await?;
    tracing::debug!(url, bytes = content.len(), "Fetched remote document");

    Ok(Fetched {
        content,
        hints: SourceHints {
            declared_mime,
            origin: Some(filename.unwrap_or_else(|| url.to_string())),
        },
    })
}

async fn read_capped(mut response: reqwest::Response, limit: usize) -> Result<Bytes> {
    let mut body = BytesMut::new();
    while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
        let actual = body.len() + chunk.len();
        if actual > limit {
            return Err(DocdownError::PayloadTooLarge { limit, actual });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

fn transport_error(e: reqwest::Error) -> DocdownError {
    if e.is_timeout() {
        DocdownError::Timeout("Request timeout".to_string())
    } else {
        DocdownError::fetch_with_source(format!("Failed to download file: {}", e), e)
    }
}

/// Filename from a `Content-Disposition` header value.
///
/// The extended `filename*=charset'lang'value` form wins over a plain
/// `filename=`; UTF-8 and ISO-8859-1 values are percent-decoded.
pub fn parse_content_disposition_filename(value: &str) -> Option<String> {
    let mut plain = None;
    for param in value.split(';').skip(1) {
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.eq_ignore_ascii_case("filename*") {
            if let Some(filename) = decode_ext_value(raw.trim()) {
                return Some(filename);
            }
        } else if name.eq_ignore_ascii_case("filename") && plain.is_none() {
            let filename = raw.trim().trim_matches('"');
            if !filename.is_empty() {
                plain = Some(filename.to_string());
            }
        }
    }
    plain
}

fn decode_ext_value(raw: &str) -> Option<String> {
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?.trim_matches('"');

    let filename = if charset.eq_ignore_ascii_case("utf-8") {
        urlencoding::decode(encoded).ok()?.into_owned()
    } else if charset.eq_ignore_ascii_case("iso-8859-1") {
        let bytes = urlencoding::decode_binary(encoded.as_bytes());
        encoding_rs::WINDOWS_1252.decode_without_bom_handling(&bytes).0.into_owned()
    } else {
        tracing::debug!(charset, "Ignoring filename* with unsupported charset");
        return None;
    };
    (!filename.is_empty()).then_some(filename)
}
