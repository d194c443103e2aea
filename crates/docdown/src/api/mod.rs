//! REST API server for document conversion.
//!
//! # Endpoints
//!
//! - `POST /convert` - Convert an uploaded `file` or a remote `url` to Markdown (authenticated)
//! - `GET /openapi.json` - OpenAPI description (authenticated)
//! - `GET /health` - Health check
//!
//! Authentication uses a single shared secret sent as `X-API-Key: <key>` or
//! `Authorization: Bearer <key>`.
//!
//! # cURL Examples
//!
//! ```bash
//! # Upload a file
//! curl -H "X-API-Key: $API_KEY" -F "file=@report.pdf" http://localhost:8000/convert
//!
//! # Convert a web page
//! curl -H "Authorization: Bearer $API_KEY" -F "url=https://example.com/post.html" \
//!      http://localhost:8000/convert
//!
//! # Health check
//! curl http://localhost:8000/health
//! ```

mod auth;
mod error;
mod fetch;
mod handlers;
mod server;
mod types;

pub use auth::{API_KEY_HEADER, is_authorized};
pub use error::{ApiError, WWW_AUTHENTICATE_VALUE, status_for};
pub use fetch::{Fetched, fetch_url};
pub use handlers::openapi_document;
pub use server::{create_router, serve};
pub use types::{ApiState, ConvertResponse, ErrorResponse, HealthResponse, MULTIPART_OVERHEAD_BYTES};
