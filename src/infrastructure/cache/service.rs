//! Cache service trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::resolution::VideoResolution;

/// Trait for the short-lived resolution cache.
///
/// Keys are normalized URLs; values are prior successful resolutions.
/// Implementations must be thread-safe for concurrent `get`/`put` from
/// multiple in-flight resolutions and must never hand out expired entries.
/// A stampede on one uncached key is not the cache's problem; deduplication
/// lives in the coordinator so the cache stays simple and lock-cheap.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - bounded in-memory LRU with per-entry TTL
/// - [`crate::infrastructure::cache::NullCache`] - no-op implementation for disabled caching
#[async_trait]
pub trait ResolutionCache: Send + Sync {
    /// Returns the cached resolution for a normalized URL key, if present
    /// and not expired.
    async fn get(&self, key: &str) -> Option<VideoResolution>;

    /// Stores a resolution under a normalized URL key.
    ///
    /// Replaces any existing entry wholesale. `ttl` bounds how long the
    /// entry may be served; stream URLs are time-limited, so entries are
    /// never cached indefinitely.
    async fn put(&self, key: &str, value: VideoResolution, ttl: Duration);

    /// Number of entries currently held (expired-but-unevicted included).
    /// Used by health reporting.
    async fn entry_count(&self) -> usize;
}
