//! Shared-secret authentication.
//!
//! A request is authenticated when either `X-API-Key` or an
//! `Authorization: Bearer` token equals the configured key.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::{error::ApiError, types::ApiState};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Whether `headers` carry the expected key.
pub fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
    let api_key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if api_key == Some(expected) {
        return true;
    }

    extract_bearer_token(headers).is_some_and(|token| token == expected)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
}

/// Middleware rejecting unauthenticated requests with 401.
pub async fn require_api_key(State(state): State<ApiState>, request: Request, next: Next) -> Result<Response, ApiError> {
    if is_authorized(request.headers(), &state.config.api_key) {
        Ok(next.run(request).await)
    } else {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
        Err(ApiError::unauthorized())
    }
}
