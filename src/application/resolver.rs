//! The resolution coordinator.
//!
//! Single entry point for turning a raw page URL into a [`VideoResolution`]:
//! classify, consult the cache, deduplicate concurrent identical requests,
//! acquire an admission slot, run the extraction with a per-attempt timeout,
//! retry retryable failures with backoff, normalize, and cache the result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metrics::counter;
use tokio::sync::OnceCell;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, instrument};

use crate::application::admission::AdmissionController;
use crate::application::normalizer;
use crate::domain::failure::ResolveError;
use crate::domain::platform::{PlatformProfile, UrlClassifier};
use crate::domain::resolution::VideoResolution;
use crate::infrastructure::cache::ResolutionCache;
use crate::infrastructure::extractor::{ExtractOptions, ExtractionBackend};

type SharedOutcome = Arc<OnceCell<Result<VideoResolution, ResolveError>>>;

/// Tunables for one resolver instance.
#[derive(Debug, Clone)]
pub struct ResolvePolicy {
    /// Wall-clock budget for a single extraction attempt.
    pub attempt_timeout: Duration,
    /// Total attempts for retryable failures (1 initial + N-1 retries).
    pub max_attempts: usize,
    /// Global TTL override; when absent, each platform's default applies.
    pub cache_ttl_override: Option<Duration>,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(30),
            max_attempts: 3,
            cache_ttl_override: None,
        }
    }
}

/// Orchestrates classification, extraction, normalization, caching, and
/// concurrency policy.
///
/// Owns only request-scoped state; the cache and the admission controller
/// are injected shared services with their own synchronization.
pub struct ResolverService {
    classifier: UrlClassifier,
    backend: Arc<dyn ExtractionBackend>,
    cache: Arc<dyn ResolutionCache>,
    admission: Arc<AdmissionController>,
    policy: ResolvePolicy,
    /// Concurrent identical requests (same normalized key) share one
    /// extraction call and observe the same outcome.
    inflight: Mutex<HashMap<String, SharedOutcome>>,
}

impl ResolverService {
    pub fn new(
        classifier: UrlClassifier,
        backend: Arc<dyn ExtractionBackend>,
        cache: Arc<dyn ResolutionCache>,
        admission: Arc<AdmissionController>,
        policy: ResolvePolicy,
    ) -> Self {
        Self {
            classifier,
            backend,
            cache,
            admission,
            policy,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a raw page URL into a playable stream plus metadata.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ResolveError`]; classification and admission
    /// failures are returned immediately, extraction failures after the
    /// retry policy is exhausted.
    #[instrument(skip(self), fields(url = raw_url))]
    pub async fn resolve(&self, raw_url: &str) -> Result<VideoResolution, ResolveError> {
        let (platform, key) = self.classifier.classify(raw_url)?;

        if platform == PlatformProfile::Unsupported {
            return Err(ResolveError::unsupported(platform));
        }

        if let Some(hit) = self.cache.get(&key).await {
            counter!("resolver_cache_hits_total", "platform" => platform.as_str()).increment(1);
            return Ok(hit);
        }
        counter!("resolver_cache_misses_total", "platform" => platform.as_str()).increment(1);

        let cell: SharedOutcome = {
            let mut inflight = self.inflight.lock().expect("inflight lock poisoned");
            inflight.entry(key.clone()).or_default().clone()
        };

        let outcome = cell
            .get_or_init(|| self.resolve_uncached(platform, key.clone()))
            .await
            .clone();

        self.inflight
            .lock()
            .expect("inflight lock poisoned")
            .remove(&key);

        outcome
    }

    /// Cache-miss path: admission, bounded attempts, normalization, cache
    /// population. The admission slot is held across the whole retry loop
    /// and released on every exit path, including cancellation.
    async fn resolve_uncached(
        &self,
        platform: PlatformProfile,
        key: String,
    ) -> Result<VideoResolution, ResolveError> {
        let _slot = self.admission.acquire(platform).await?;

        // 500 ms, 1 s, 2 s, ... with proportional jitter.
        let backoff = ExponentialBackoff::from_millis(2)
            .factor(250)
            .map(jitter)
            .take(self.policy.max_attempts.saturating_sub(1));

        let result = RetryIf::spawn(
            backoff,
            || self.attempt(platform, &key),
            |error: &ResolveError| error.retryable,
        )
        .await;

        match result {
            Ok(resolution) => {
                let ttl = self
                    .policy
                    .cache_ttl_override
                    .unwrap_or_else(|| platform.default_cache_ttl());
                self.cache.put(&key, resolution.clone(), ttl).await;
                counter!("resolver_success_total", "platform" => platform.as_str()).increment(1);
                info!(%platform, title = %resolution.title, "Resolved stream URL");
                Ok(resolution)
            }
            Err(error) => {
                counter!(
                    "resolver_failure_total",
                    "platform" => platform.as_str(),
                    "kind" => error.kind.as_str(),
                )
                .increment(1);
                Err(error)
            }
        }
    }

    /// One extraction attempt under the per-attempt timeout.
    async fn attempt(
        &self,
        platform: PlatformProfile,
        url: &str,
    ) -> Result<VideoResolution, ResolveError> {
        debug!(%platform, "Extraction attempt");
        let options = ExtractOptions { platform };

        match tokio::time::timeout(
            self.policy.attempt_timeout,
            self.backend.extract(url, options),
        )
        .await
        {
            Err(_) => Err(ResolveError::timeout(
                platform,
                "Extraction timed out, the source may be slow or unreachable",
            )),
            Ok(Err(backend_error)) => {
                Err(normalizer::classify_backend_error(&backend_error, platform))
            }
            Ok(Ok(raw)) => normalizer::normalize(&raw, platform),
        }
    }
}
