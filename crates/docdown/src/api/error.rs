//! HTTP error mapping.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

use crate::DocdownError;

use super::types::ErrorResponse;

/// Value of `WWW-Authenticate` on 401 responses.
pub const WWW_AUTHENTICATE_VALUE: &str = "Bearer or X-API-Key";

/// Error returned by API handlers.
///
/// Carries the status code and the JSON body `{error_type, message, status_code}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: DocdownError) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error_type: error.kind().to_string(),
                message: error.to_string(),
                status_code: status.as_u16(),
            },
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, DocdownError::Unauthorized)
    }
}

/// Status code for a library error.
pub fn status_for(error: &DocdownError) -> StatusCode {
    match error {
        DocdownError::Validation { .. } | DocdownError::UnsupportedFormat(_) | DocdownError::Fetch { .. } => {
            StatusCode::BAD_REQUEST
        }
        DocdownError::Unauthorized => StatusCode::UNAUTHORIZED,
        DocdownError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        DocdownError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        DocdownError::ExtractionFailed { .. }
        | DocdownError::ConversionFailed { .. }
        | DocdownError::Io(_)
        | DocdownError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DocdownError> for ApiError {
    fn from(error: DocdownError) -> Self {
        let status = status_for(&error);
        if status.is_server_error() {
            tracing::error!(error = %error, "Request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        }
        Self::new(status, error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(WWW_AUTHENTICATE_VALUE));
        }
        response
    }
}
