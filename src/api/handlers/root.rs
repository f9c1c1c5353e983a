//! Handler for the service banner endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Returns service information and the endpoint list.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Video URL Resolver API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "online",
        "endpoints": {
            "resolve": "POST /resolve - Resolve a video page URL",
            "health": "GET /health - Service health status"
        }
    }))
}
