//! Timing and concurrency behavior of the resolution coordinator.

mod common;

use std::sync::Arc;
use std::time::Duration;

use stream_resolver::application::admission::AdmissionController;
use stream_resolver::application::resolver::ResolvePolicy;
use stream_resolver::domain::failure::ErrorKind;
use stream_resolver::infrastructure::cache::NullCache;

use common::FakeBackend;

#[tokio::test(start_paused = true)]
async fn test_slow_backend_hits_per_attempt_timeout() {
    // Backend answers after a minute; every attempt must be cut off at the
    // one-second budget and the failure classified as a timeout.
    let backend = Arc::new(FakeBackend::always_ok().with_delay(Duration::from_secs(60)));
    let policy = ResolvePolicy {
        attempt_timeout: Duration::from_secs(1),
        max_attempts: 3,
        cache_ttl_override: None,
    };
    let resolver = common::create_resolver(
        backend.clone(),
        Arc::new(NullCache),
        common::test_admission(),
        policy,
    );

    let err = resolver
        .resolve("https://www.youtube.com/watch?v=slow")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Timeout);
    assert!(err.retryable);
    assert_eq!(backend.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_saturated_platform_rejects_within_bound() {
    // One slot per platform; a long extraction occupies it, so the second
    // request must be rejected after the admission wait instead of queueing
    // indefinitely.
    let backend = Arc::new(FakeBackend::always_ok().with_delay(Duration::from_secs(60)));
    let admission = Arc::new(AdmissionController::new(8, 1, Duration::from_millis(100)));
    let resolver = common::create_resolver(
        backend.clone(),
        Arc::new(NullCache),
        admission,
        common::test_policy(),
    );

    let occupant = {
        let resolver = resolver.clone();
        tokio::spawn(async move {
            resolver
                .resolve("https://www.youtube.com/watch?v=first")
                .await
        })
    };

    // Let the occupant take the platform slot.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = resolver
        .resolve("https://www.youtube.com/watch?v=second")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::RateLimited);
    assert!(err.retryable);
    assert_eq!(backend.calls(), 1);

    occupant.abort();
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_identical_requests_share_one_extraction() {
    let backend = Arc::new(FakeBackend::always_ok().with_delay(Duration::from_millis(50)));
    let resolver = common::create_resolver(
        backend.clone(),
        Arc::new(NullCache),
        common::test_admission(),
        common::test_policy(),
    );

    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    let (first, second) = tokio::join!(resolver.resolve(url), resolver.resolve(url));

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first, second);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_distinct_urls_do_not_share_extractions() {
    let backend = Arc::new(FakeBackend::always_ok().with_delay(Duration::from_millis(50)));
    let resolver = common::create_resolver(
        backend.clone(),
        Arc::new(NullCache),
        common::test_admission(),
        common::test_policy(),
    );

    let (first, second) = tokio::join!(
        resolver.resolve("https://www.youtube.com/watch?v=one"),
        resolver.resolve("https://www.youtube.com/watch?v=two"),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(backend.calls(), 2);
}
