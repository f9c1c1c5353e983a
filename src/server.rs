//! HTTP server initialization and runtime setup.
//!
//! Wires the extraction backend, cache, admission controller, and resolver
//! together, then runs the Axum server until shutdown.

use crate::application::admission::AdmissionController;
use crate::application::resolver::{ResolvePolicy, ResolverService};
use crate::config::Config;
use crate::domain::platform::UrlClassifier;
use crate::infrastructure::cache::{MemoryCache, NullCache, ResolutionCache};
use crate::infrastructure::extractor::{ExtractionBackend, YtDlpExtractor};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - yt-dlp extraction backend (with an availability probe)
/// - In-memory resolution cache (or NullCache when capacity is 0)
/// - Admission controller with global and per-platform bounds
/// - Resolution coordinator
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the listen address is invalid, the bind fails, or the
/// server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let backend: Arc<dyn ExtractionBackend> = Arc::new(YtDlpExtractor::new(
        config.ytdlp_bin.clone(),
        config.extract_timeout(),
    ));

    // A missing binary is not fatal at startup; /health reports it and every
    // resolve fails with extraction_unavailable until it appears on PATH.
    if backend.is_available().await {
        tracing::info!("Extraction backend available ({})", config.ytdlp_bin);
    } else {
        tracing::warn!(
            "Extraction backend '{}' not found on PATH; resolves will fail until it is installed",
            config.ytdlp_bin
        );
    }

    let cache: Arc<dyn ResolutionCache> = if config.is_cache_enabled() {
        tracing::info!("Cache enabled ({} entries)", config.cache_capacity);
        Arc::new(MemoryCache::new(config.cache_capacity))
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let admission = Arc::new(AdmissionController::new(
        config.max_inflight,
        config.max_inflight_per_platform,
        config.admission_wait(),
    ));

    let classifier = UrlClassifier::new(config.disabled_platforms.clone());

    let policy = ResolvePolicy {
        attempt_timeout: config.extract_timeout(),
        max_attempts: config.max_attempts,
        cache_ttl_override: config.cache_ttl_override(),
    };

    let resolver = Arc::new(ResolverService::new(
        classifier,
        backend.clone(),
        cache.clone(),
        admission.clone(),
        policy,
    ));

    let state = AppState::new(resolver, backend, cache, admission);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
