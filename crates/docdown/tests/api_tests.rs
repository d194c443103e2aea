//! Integration tests for the API module.

#![cfg(feature = "api")]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use docdown::{
    Converter, Result, ServiceConfig,
    api::{ApiState, ConvertResponse, ErrorResponse, HealthResponse, WWW_AUTHENTICATE_VALUE, create_router},
    extractors::{ChardetngDetector, HtmlToMarkdownExtractor, HtmlToMarkdownRenderer, MainContentExtractor},
    plugins::{DocumentConverter, Plugin},
};

const API_KEY: &str = "test-secret";
const BOUNDARY: &str = "----docdownboundary";

struct EchoConverter;

impl Plugin for EchoConverter {
    fn name(&self) -> &str {
        "echo"
    }
}

#[async_trait]
impl DocumentConverter for EchoConverter {
    async fn convert_file(&self, path: &Path, extension: &str) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(format!("converted {} bytes as {}", bytes.len(), extension))
    }
}

fn config(max_upload_bytes: usize) -> ServiceConfig {
    ServiceConfig {
        api_key: API_KEY.to_string(),
        max_upload_bytes,
        fetch_timeout_secs: 5,
        version: "9.9.9".to_string(),
        ..Default::default()
    }
}

fn app_with_limit(max_upload_bytes: usize) -> Router {
    app_with_config(config(max_upload_bytes))
}

fn app_with_config(config: ServiceConfig) -> Router {
    let converter = Converter::new(
        Arc::new(EchoConverter),
        Arc::new(HtmlToMarkdownExtractor),
        Arc::new(MainContentExtractor),
        Arc::new(HtmlToMarkdownRenderer),
        Arc::new(ChardetngDetector),
    );
    let state = ApiState::with_converter(config, converter).unwrap();
    create_router(state)
}

fn app() -> Router {
    app_with_limit(1024 * 1024)
}

enum Part<'a> {
    File {
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}", name, value).as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn convert_request(parts: &[Part<'_>], auth: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/convert")
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY));
    if let Some((name, value)) = auth {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn pdf_part() -> Part<'static> {
    Part::File {
        filename: "report.pdf",
        content_type: "application/pdf",
        data: b"%PDF-1.4 body",
    }
}

/// Spawn a throwaway origin server and return its base URL.
async fn spawn_origin() -> String {
    let origin = Router::new()
        .route(
            "/export",
            get(|| async {
                (
                    [
                        (header::CONTENT_TYPE, "application/octet-stream"),
                        (header::CONTENT_DISPOSITION, "attachment; filename=\"export.csv\""),
                    ],
                    "id,name\n1,alpha\n",
                )
            }),
        )
        .route(
            "/page",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    "<html><body><h1>Remote Title</h1><p>Remote body</p></body></html>",
                )
            }),
        )
        .route(
            "/summary",
            get(|| async {
                (
                    [(
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"summary.bin\"; filename*=UTF-8''Q3%20summary.json",
                    )],
                    "{\"quarter\": 3}",
                )
            }),
        )
        .route("/large.pdf", get(|| async { vec![b'x'; 4096] }))
        .route(
            "/streamed.pdf",
            get(|| async {
                let chunks = (0..8).map(|_| Ok::<_, std::io::Error>(vec![b'x'; 512]));
                Body::from_stream(futures::stream::iter(chunks))
            }),
        )
        .route(
            "/slow.pdf",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "%PDF-1.4 late"
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, origin).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, "9.9.9");
}

#[tokio::test]
async fn test_convert_without_credentials_is_unauthorized() {
    let response = app().oneshot(convert_request(&[pdf_part()], None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        WWW_AUTHENTICATE_VALUE
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.status_code, 401);
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() {
    let response = app()
        .oneshot(convert_request(&[pdf_part()], Some(("x-api-key", "nope"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app()
        .oneshot(convert_request(&[pdf_part()], Some(("authorization", "Basic dGVzdA=="))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_convert_upload_with_api_key_header() {
    let response = app()
        .oneshot(convert_request(&[pdf_part()], Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let outcome: ConvertResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(outcome.markdown, "converted 13 bytes as .pdf");
    assert_eq!(outcome.metadata.mime_type, "application/pdf");
    assert_eq!(outcome.metadata.extension, ".pdf");
    assert_eq!(outcome.metadata.source_bytes, 13);
}

#[tokio::test]
async fn test_convert_upload_with_bearer_token() {
    let bearer = format!("Bearer {}", API_KEY);
    let response = app()
        .oneshot(convert_request(&[pdf_part()], Some(("authorization", bearer.as_str()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["metadata"]["method"], "generic-document");
    assert!(json["result"].as_str().unwrap().starts_with("converted"));
}

#[tokio::test]
async fn test_misleading_upload_is_sniffed() {
    let part = Part::File {
        filename: "upload.bin",
        content_type: "application/octet-stream",
        data: b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR",
    };
    let response = app()
        .oneshot(convert_request(&[part], Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["metadata"]["mime_type"], "image/png");
    assert_eq!(json["metadata"]["extension"], ".png");
}

#[tokio::test]
async fn test_html_upload_uses_structured_extraction() {
    let part = Part::File {
        filename: "page.html",
        content_type: "text/html",
        data: b"<html><body><h1>Hello</h1><p>World of docs</p></body></html>",
    };
    let response = app()
        .oneshot(convert_request(&[part], Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["metadata"]["method"], "structured-extraction");
    assert!(json["result"].as_str().unwrap().contains("Hello"));
}

#[tokio::test]
async fn test_neither_file_nor_url_is_bad_request() {
    let response = app()
        .oneshot(convert_request(&[], Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "ValidationError");
    assert!(json["message"].as_str().unwrap().contains("Either file or url"));
}

#[tokio::test]
async fn test_both_file_and_url_is_bad_request() {
    let parts = [
        pdf_part(),
        Part::Text {
            name: "url",
            value: "https://example.com/report.pdf",
        },
    ];
    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("Only one of file or url"));
}

#[tokio::test]
async fn test_unsupported_upload_is_bad_request() {
    let part = Part::File {
        filename: "tool.exe",
        content_type: "application/x-msdownload",
        data: b"MZ\x90\x00\x03\x00\x00\x00",
    };
    let response = app()
        .oneshot(convert_request(&[part], Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "UnsupportedFormat");
}

#[tokio::test]
async fn test_oversize_upload_is_payload_too_large() {
    let data = vec![b'a'; 256];
    let part = Part::File {
        filename: "big.csv",
        content_type: "text/csv",
        data: &data,
    };
    let response = app_with_limit(64)
        .oneshot(convert_request(&[part], Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert_eq!(json["status_code"], 413);
}

#[tokio::test]
async fn test_openapi_requires_auth() {
    let response = app()
        .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .header("x-api-key", API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["info"]["version"], "9.9.9");
    assert!(json["paths"]["/convert"]["post"].is_object());
    assert!(json["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn test_non_http_url_is_bad_request() {
    let parts = [Part::Text {
        name: "url",
        value: "file:///etc/passwd",
    }];
    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_url_uses_content_disposition_filename() {
    let base = spawn_origin().await;
    let url = format!("{}/export", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["metadata"]["extension"], ".csv");
    assert_eq!(json["metadata"]["mime_type"], "text/csv");
    assert_eq!(json["result"], "converted 16 bytes as .csv");
}

#[tokio::test]
async fn test_url_html_page() {
    let base = spawn_origin().await;
    let url = format!("{}/page", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["metadata"]["mime_type"], "text/html");
    assert!(json["result"].as_str().unwrap().contains("Remote body"));
}

#[tokio::test]
async fn test_url_content_length_over_limit() {
    let base = spawn_origin().await;
    let url = format!("{}/large.pdf", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app_with_limit(1024)
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_url_not_found_is_bad_request() {
    let base = spawn_origin().await;
    let url = format!("{}/missing", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "FetchError");
}

#[tokio::test]
async fn test_url_extended_content_disposition_filename() {
    let base = spawn_origin().await;
    let url = format!("{}/summary", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["metadata"]["extension"], ".json");
    assert_eq!(json["metadata"]["mime_type"], "application/json");
}

#[tokio::test]
async fn test_url_streamed_body_over_limit() {
    let base = spawn_origin().await;
    let url = format!("{}/streamed.pdf", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app_with_limit(1024)
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "PayloadTooLarge");
}

#[tokio::test]
async fn test_url_streamed_body_within_limit() {
    let base = spawn_origin().await;
    let url = format!("{}/streamed.pdf", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app()
        .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["result"], "converted 4096 bytes as .pdf");
}

#[tokio::test]
async fn test_url_download_timeout() {
    let base = spawn_origin().await;
    let url = format!("{}/slow.pdf", base);
    let parts = [Part::Text { name: "url", value: &url }];

    let response = app_with_config(ServiceConfig {
        fetch_timeout_secs: 1,
        ..config(1024 * 1024)
    })
    .oneshot(convert_request(&parts, Some(("x-api-key", API_KEY))))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "Timeout");
    assert_eq!(json["status_code"], 408);
}
