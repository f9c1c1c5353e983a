//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - Service banner
//! - `GET  /health`   - Health check: extractor, cache, admission slots
//! - `POST /resolve`  - Resolve a video page URL into a stream URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the resolve endpoint
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, resolve_handler, root_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/resolve", post(resolve_handler).layer(rate_limit::layer()))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
