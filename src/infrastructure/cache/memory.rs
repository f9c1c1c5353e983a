//! Bounded in-memory cache: LRU eviction plus per-entry TTL.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tracing::debug;

use super::service::ResolutionCache;
use crate::domain::resolution::VideoResolution;

struct Entry {
    value: VideoResolution,
    deadline: Instant,
}

/// Process-wide in-memory resolution cache.
///
/// Capacity eviction is least-recently-used and independent of TTL expiry;
/// expired entries are dropped lazily on read. All state lives behind one
/// mutex, which is fine at this scale: the critical sections are a map
/// lookup or insert, never an await point.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryCache {
    /// Creates a cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("max(1) is non-zero");
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }
}

#[async_trait]
impl ResolutionCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<VideoResolution> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        let expired = match entries.get(key) {
            Some(entry) if entry.deadline > Instant::now() => {
                debug!(key, "Cache HIT");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
            debug!(key, "Cache entry expired");
        } else {
            debug!(key, "Cache MISS");
        }
        None
    }

    async fn put(&self, key: &str, value: VideoResolution, ttl: Duration) {
        let entry = Entry {
            value,
            deadline: Instant::now() + ttl,
        };
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.put(key.to_string(), entry);
        debug!(key, ttl_secs = ttl.as_secs(), "Cache SET");
    }

    async fn entry_count(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resolution(stream_url: &str) -> VideoResolution {
        VideoResolution {
            title: "T".to_string(),
            thumbnail_url: None,
            duration_seconds: Some(10),
            stream_url: stream_url.to_string(),
            resolved_at: Utc::now(),
            expires_estimate_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_returns_stored_value() {
        let cache = MemoryCache::new(8);
        cache
            .put("k", resolution("https://cdn/x"), Duration::from_secs(60))
            .await;

        let hit = cache.get("k").await.unwrap();
        assert_eq!(hit.stream_url, "https://cdn/x");
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new(8);
        cache
            .put("k", resolution("https://cdn/x"), Duration::from_millis(10))
            .await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("k").await.is_none());
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = MemoryCache::new(2);
        cache
            .put("a", resolution("https://cdn/a"), Duration::from_secs(60))
            .await;
        cache
            .put("b", resolution("https://cdn/b"), Duration::from_secs(60))
            .await;

        // Touch "a" so "b" becomes the eviction candidate.
        assert!(cache.get("a").await.is_some());

        cache
            .put("c", resolution("https://cdn/c"), Duration::from_secs(60))
            .await;

        assert!(cache.get("a").await.is_some());
        assert!(cache.get("b").await.is_none());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn test_put_replaces_wholesale() {
        let cache = MemoryCache::new(8);
        cache
            .put("k", resolution("https://cdn/old"), Duration::from_secs(60))
            .await;
        cache
            .put("k", resolution("https://cdn/new"), Duration::from_secs(60))
            .await;

        assert_eq!(cache.get("k").await.unwrap().stream_url, "https://cdn/new");
        assert_eq!(cache.entry_count().await, 1);
    }
}
