//! API request handlers.

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError},
    },
};
use bytes::BytesMut;
use serde_json::{Value, json};

use crate::{DocdownError, core::resolve::resolve_hints};

use super::{
    error::ApiError,
    fetch::fetch_url,
    types::{ApiState, ConvertForm, ConvertInput, ConvertResponse, HealthResponse, Upload},
};

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.config.version.clone(),
    })
}

/// OpenAPI document handler.
///
/// GET /openapi.json (authenticated)
pub async fn openapi_handler(State(state): State<ApiState>) -> Json<Value> {
    Json(openapi_document(&state.config.version))
}

/// Convert endpoint handler.
///
/// POST /convert
///
/// Accepts multipart form data with exactly one of:
/// - `file`: the document to convert
/// - `url`: an `http`/`https` URL to download and convert
///
/// Uploads and downloads above `max_upload_bytes` are rejected with 413.
pub async fn convert_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<ConvertResponse>, ApiError> {
    let limit = state.config.max_upload_bytes;
    let form = read_convert_form(&mut multipart, limit).await?;

    let (content, hints) = match form.into_input()? {
        ConvertInput::File(upload) => {
            let hints = upload.hints();
            (upload.data, hints)
        }
        ConvertInput::Url(url) => {
            let fetched = fetch_url(&state.http, &url, limit).await?;
            (fetched.content, fetched.hints)
        }
    };

    let resolved = resolve_hints(&content, &hints);
    let outcome = state.converter.convert(&content, &resolved).await?;
    Ok(Json(outcome))
}

async fn read_convert_form(multipart: &mut Multipart, limit: usize) -> Result<ConvertForm, ApiError> {
    let mut form = ConvertForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data = read_field_capped(&mut field, limit).await?;

                // Browsers send an empty, unnamed part for an empty file input.
                if data.is_empty() && filename.as_deref().is_none_or(str::is_empty) {
                    continue;
                }

                form.file = Some(Upload {
                    filename,
                    content_type,
                    data,
                });
            }
            "url" => {
                let url = field.text().await.map_err(multipart_error)?;
                let url = url.trim();
                if !url.is_empty() {
                    form.url = Some(url.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_field_capped(field: &mut Field<'_>, limit: usize) -> Result<bytes::Bytes, ApiError> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        let actual = data.len() + chunk.len();
        if actual > limit {
            return Err(DocdownError::PayloadTooLarge { limit, actual }.into());
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data.freeze())
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::new(e.status(), DocdownError::validation(e.body_text()))
}

/// OpenAPI 3 description of the service.
pub fn openapi_document(version: &str) -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "docdown API",
            "version": version,
            "description": "REST API service for converting documents to Markdown"
        },
        "components": {
            "securitySchemes": {
                "ApiKeyHeader": { "type": "apiKey", "in": "header", "name": "X-API-Key" },
                "BearerAuth": { "type": "http", "scheme": "bearer" }
            },
            "schemas": {
                "ConversionResult": {
                    "type": "object",
                    "required": ["result", "metadata"],
                    "properties": {
                        "result": { "type": "string" },
                        "metadata": {
                            "type": "object",
                            "properties": {
                                "method": {
                                    "type": "string",
                                    "enum": ["generic-document", "structured-extraction", "readability-fallback"]
                                },
                                "mime_type": { "type": "string" },
                                "extension": { "type": "string" },
                                "source_bytes": { "type": "integer" },
                                "markdown_chars": { "type": "integer" },
                                "duration_ms": { "type": "integer" }
                            }
                        }
                    }
                },
                "HealthResponse": {
                    "type": "object",
                    "required": ["status", "version"],
                    "properties": {
                        "status": { "type": "string" },
                        "version": { "type": "string" }
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error_type": { "type": "string" },
                        "message": { "type": "string" },
                        "status_code": { "type": "integer" }
                    }
                }
            }
        },
        "paths": {
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "Service is healthy",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/HealthResponse" } } }
                        }
                    }
                }
            },
            "/convert": {
                "post": {
                    "summary": "Convert a file or URL to Markdown",
                    "security": [{ "ApiKeyHeader": [] }, { "BearerAuth": [] }],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "file": { "type": "string", "format": "binary" },
                                        "url": { "type": "string", "format": "uri" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Converted Markdown",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ConversionResult" } } }
                        },
                        "400": { "description": "Invalid input or unsupported format" },
                        "401": { "description": "Invalid authentication credentials" },
                        "408": { "description": "Remote download timed out" },
                        "413": { "description": "Payload too large" },
                        "500": { "description": "Conversion failed" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_endpoints() {
        let doc = openapi_document("1.2.3");
        assert_eq!(doc["info"]["version"], "1.2.3");
        assert!(doc["paths"]["/convert"]["post"].is_object());
        assert!(doc["paths"]["/health"]["get"].is_object());
    }
}
