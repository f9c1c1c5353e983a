//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Extractor**: yt-dlp binary reachable
/// 2. **Cache**: entry count report
/// 3. **Admission**: free extraction slots remain
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let extractor_check = check_extractor(&state).await;
    let cache_check = check_cache(&state).await;
    let admission_check = check_admission(&state);

    let all_healthy = extractor_check.status == "ok"
        && cache_check.status == "ok"
        && admission_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            extractor: extractor_check,
            cache: cache_check,
            admission: admission_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the extraction backend is usable.
async fn check_extractor(state: &AppState) -> CheckStatus {
    if state.backend.is_available().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} available", state.backend.name())),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{} binary not found", state.backend.name())),
        }
    }
}

/// Reports cache occupancy. The in-memory cache cannot fail.
async fn check_cache(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("Entries: {}", state.cache.entry_count().await)),
    }
}

/// Reports remaining extraction concurrency budget.
fn check_admission(state: &AppState) -> CheckStatus {
    let free = state.admission.available_slots();
    CheckStatus {
        status: if free > 0 { "ok" } else { "saturated" }.to_string(),
        message: Some(format!("Free slots: {free}")),
    }
}
