#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use stream_resolver::application::admission::AdmissionController;
use stream_resolver::application::resolver::{ResolvePolicy, ResolverService};
use stream_resolver::domain::platform::UrlClassifier;
use stream_resolver::domain::resolution::RawExtraction;
use stream_resolver::infrastructure::cache::{MemoryCache, ResolutionCache};
use stream_resolver::infrastructure::extractor::{
    BackendError, ExtractOptions, ExtractionBackend,
};
use stream_resolver::state::AppState;

type Script = Box<dyn Fn(usize) -> Result<RawExtraction, BackendError> + Send + Sync>;

/// Scripted extraction backend for integration tests.
///
/// The script closure receives the zero-based invocation index, so tests can
/// express "fail once, then succeed" without shared mutable state.
pub struct FakeBackend {
    script: Script,
    delay: Option<Duration>,
    available: bool,
    calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new(
        script: impl Fn(usize) -> Result<RawExtraction, BackendError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            delay: None,
            available: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Backend that always returns the standard successful extraction.
    pub fn always_ok() -> Self {
        Self::new(|_| Ok(raw_success()))
    }

    /// Sleeps for `delay` inside every `extract` call before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes `is_available` report false.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Number of `extract` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn extract(
        &self,
        _url: &str,
        _options: ExtractOptions,
    ) -> Result<RawExtraction, BackendError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.script)(index)
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

/// The standard successful extraction used across tests.
pub fn raw_success() -> RawExtraction {
    RawExtraction {
        title: Some("T".to_string()),
        duration: Some(213.0),
        url: Some("https://cdn/x".to_string()),
        ..Default::default()
    }
}

pub fn extractor_failure(diagnostic: &str) -> BackendError {
    BackendError::Extractor {
        diagnostic: diagnostic.to_string(),
    }
}

/// Default test policy: generous attempt timeout, standard attempt count,
/// per-platform TTLs.
pub fn test_policy() -> ResolvePolicy {
    ResolvePolicy {
        attempt_timeout: Duration::from_secs(5),
        max_attempts: 3,
        cache_ttl_override: None,
    }
}

pub fn test_admission() -> Arc<AdmissionController> {
    Arc::new(AdmissionController::new(8, 4, Duration::from_millis(200)))
}

pub fn create_resolver(
    backend: Arc<FakeBackend>,
    cache: Arc<dyn ResolutionCache>,
    admission: Arc<AdmissionController>,
    policy: ResolvePolicy,
) -> Arc<ResolverService> {
    Arc::new(ResolverService::new(
        UrlClassifier::default(),
        backend,
        cache,
        admission,
        policy,
    ))
}

pub fn create_test_state_with(
    backend: Arc<FakeBackend>,
    cache: Arc<dyn ResolutionCache>,
    policy: ResolvePolicy,
) -> AppState {
    let admission = test_admission();
    let resolver = create_resolver(backend.clone(), cache.clone(), admission.clone(), policy);
    AppState::new(resolver, backend, cache, admission)
}

pub fn create_test_state(backend: Arc<FakeBackend>) -> AppState {
    create_test_state_with(backend, Arc::new(MemoryCache::new(64)), test_policy())
}
