//! Handler for the resolve endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::resolve::{ResolveRequest, ResolveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a video page URL into a direct stream URL plus metadata.
///
/// # Endpoint
///
/// `POST /resolve`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" }
/// ```
///
/// # Response
///
/// Always `200 OK` for resolution outcomes:
///
/// ```json
/// {
///   "status": "success",
///   "data": {
///     "title": "...",
///     "thumbnail": "https://...",
///     "duration": 213,
///     "stream_url": "https://..."
///   }
/// }
/// ```
///
/// or
///
/// ```json
/// { "status": "error", "message": "No playable stream was found for this URL" }
/// ```
///
/// # Errors
///
/// Non-200 only for transport problems: malformed JSON body (axum
/// rejection) or an out-of-bounds `url` field (400 Bad Request).
pub async fn resolve_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    payload.validate()?;

    let response = match state.resolver.resolve(&payload.url).await {
        Ok(resolution) => ResolveResponse::success(resolution.into()),
        Err(failure) => {
            tracing::info!(
                kind = failure.kind.as_str(),
                platform = %failure.platform,
                "Resolution failed"
            );
            ResolveResponse::error(failure.detail)
        }
    };

    Ok(Json(response))
}
