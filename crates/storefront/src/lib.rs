//! Shopifake storefront library.
//!
//! Resolves each request to a presentation mode (landing, owner views, a
//! tenant storefront, or a draft preview) and renders it. Exposed as a library
//! so the router can be driven in tests and by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod drafts;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod mode;
pub mod routes;
pub mod sites;
pub mod state;
pub mod storefront_config;
pub mod tenant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, Uri};
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use error::AppError;
use state::AppState;

/// Directory static assets are served from, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the full application router.
///
/// Sentry layers are left to the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                    tenant = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the sites service is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.sites().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Sites service not reachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
