//! No-op cache implementation for testing or disabled caching.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::service::ResolutionCache;
use crate::domain::resolution::VideoResolution;

/// A cache implementation that does nothing.
///
/// Used when caching is explicitly disabled (`CACHE_CAPACITY=0`) and in
/// tests that must observe every extraction call. All operations succeed
/// immediately without storing or retrieving data.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResolutionCache for NullCache {
    async fn get(&self, _key: &str) -> Option<VideoResolution> {
        None
    }

    async fn put(&self, _key: &str, _value: VideoResolution, _ttl: Duration) {}

    async fn entry_count(&self) -> usize {
        0
    }
}
