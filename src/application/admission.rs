//! Concurrency governor for extraction work.
//!
//! Bounds total in-flight extractions and per-platform in-flight
//! extractions. Acquisition waits a short, bounded time for a slot to free
//! and then fails fast with `RateLimited` instead of queuing unbounded
//! work; this is the service's backpressure mechanism.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::{Instant, timeout_at};
use tracing::warn;

use crate::domain::failure::ResolveError;
use crate::domain::platform::PlatformProfile;

/// A held unit of extraction concurrency budget.
///
/// Dropping the slot releases both the global and the per-platform permit,
/// so cancellation or early return can never leak budget.
#[derive(Debug)]
pub struct AdmissionSlot {
    _global: OwnedSemaphorePermit,
    _platform: OwnedSemaphorePermit,
}

/// Bounds in-flight extraction work globally and per platform.
///
/// Explicitly constructed and injected, never ambient: tests build isolated
/// instances with whatever limits they need.
pub struct AdmissionController {
    global: Arc<Semaphore>,
    per_platform: HashMap<PlatformProfile, Arc<Semaphore>>,
    max_wait: Duration,
}

impl AdmissionController {
    pub fn new(max_inflight: usize, max_inflight_per_platform: usize, max_wait: Duration) -> Self {
        let per_platform = PlatformProfile::ALL
            .iter()
            .map(|profile| {
                (
                    *profile,
                    Arc::new(Semaphore::new(max_inflight_per_platform)),
                )
            })
            .collect();

        Self {
            global: Arc::new(Semaphore::new(max_inflight)),
            per_platform,
            max_wait,
        }
    }

    /// Acquires an admission slot for one resolution, waiting at most the
    /// configured bound for capacity to free.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] with kind `RateLimited` (retryable) when no
    /// slot frees within the bound.
    pub async fn acquire(&self, platform: PlatformProfile) -> Result<AdmissionSlot, ResolveError> {
        let deadline = Instant::now() + self.max_wait;

        let global = match timeout_at(deadline, self.global.clone().acquire_owned()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                return Err(ResolveError::internal(platform, "Admission pool is closed"));
            }
            Err(_) => return Err(self.saturated(platform, "global")),
        };

        let platform_pool = self
            .per_platform
            .get(&platform)
            .or_else(|| self.per_platform.get(&PlatformProfile::Generic))
            .cloned()
            .ok_or_else(|| ResolveError::internal(platform, "No admission pool for platform"))?;

        let platform_permit = match timeout_at(deadline, platform_pool.acquire_owned()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                return Err(ResolveError::internal(platform, "Admission pool is closed"));
            }
            Err(_) => return Err(self.saturated(platform, "platform")),
        };

        Ok(AdmissionSlot {
            _global: global,
            _platform: platform_permit,
        })
    }

    /// Free global permits right now. Health reporting only.
    pub fn available_slots(&self) -> usize {
        self.global.available_permits()
    }

    fn saturated(&self, platform: PlatformProfile, scope: &str) -> ResolveError {
        warn!(%platform, scope, "Admission saturated, rejecting request");
        counter!("admission_rejected_total", "platform" => platform.as_str()).increment(1);
        ResolveError::rate_limited(
            platform,
            "Server is handling too many extractions, please retry shortly",
        )
    }
}
