//! API server setup and configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{DocdownError, Result, ServiceConfig};

use super::{
    auth::require_api_key,
    handlers::{convert_handler, health_handler, openapi_handler},
    types::ApiState,
};

/// Comma-separated list of allowed CORS origins; unset means any origin.
pub const CORS_ORIGINS_ENV: &str = "DOCDOWN_CORS_ORIGINS";

fn cors_layer() -> CorsLayer {
    if let Ok(origins_str) = std::env::var(CORS_ORIGINS_ENV) {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!("{} set but empty/invalid, falling back to permissive CORS", CORS_ORIGINS_ENV);
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router.
///
/// `/health` is public; `/convert` and `/openapi.json` require the API key.
/// The request body is capped at `max_upload_bytes` plus multipart overhead.
///
/// # Examples
///
/// ```no_run
/// use docdown::{ServiceConfig, api::{ApiState, create_router}};
///
/// # fn example() -> docdown::Result<()> {
/// let state = ApiState::new(ServiceConfig::default())?;
/// let router = create_router(state);
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: ApiState) -> Router {
    let body_limit = state.body_limit();

    let protected = Router::new()
        .route("/convert", post(convert_handler))
        .route("/openapi.json", get(openapi_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server and run until Ctrl-C.
pub async fn serve(config: ServiceConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    if config.api_key == crate::core::config::DEFAULT_API_KEY {
        tracing::warn!("Using the built-in default API key; set API_KEY for any shared deployment");
    }
    tracing::info!(
        "Upload size limit: {} bytes ({:.1} MB)",
        config.max_upload_bytes,
        config.max_upload_bytes as f64 / (1024.0 * 1024.0)
    );

    let app = create_router(ApiState::new(config)?);

    tracing::info!("Starting docdown API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(DocdownError::Io)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DocdownError::Other(e.to_string()))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
