//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::admission::AdmissionController;
use crate::application::resolver::ResolverService;
use crate::infrastructure::cache::ResolutionCache;
use crate::infrastructure::extractor::ExtractionBackend;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ResolverService>,
    pub backend: Arc<dyn ExtractionBackend>,
    pub cache: Arc<dyn ResolutionCache>,
    pub admission: Arc<AdmissionController>,
}

impl AppState {
    pub fn new(
        resolver: Arc<ResolverService>,
        backend: Arc<dyn ExtractionBackend>,
        cache: Arc<dyn ResolutionCache>,
        admission: Arc<AdmissionController>,
    ) -> Self {
        Self {
            resolver,
            backend,
            cache,
            admission,
        }
    }
}
