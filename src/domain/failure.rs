//! Resolution failure taxonomy.
//!
//! Every failure mode of the pipeline, from malformed input to backend
//! breakage, is folded into the closed [`ErrorKind`] set. Backend-specific
//! diagnostics never leave the process unclassified; the normalizer is the
//! single translation point.

use serde::Serialize;

use crate::domain::platform::PlatformProfile;

/// Closed classification of resolution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input was empty, non-HTTP(S), or unparsable.
    InvalidUrl,
    /// The matched platform profile is disabled by configuration.
    UnsupportedPlatform,
    /// An extraction attempt exceeded its time budget.
    Timeout,
    /// Admission was refused under load, or the platform rate-limited us.
    RateLimited,
    /// The source has no playable stream (private, removed, DRM, ...).
    ExtractionUnavailable,
    /// The extractor reported a platform-side failure (4xx/5xx, bot checks).
    UpstreamError,
    /// Anything unrecognized; logged for follow-up, never swallowed.
    Internal,
}

impl ErrorKind {
    /// Whether failures of this kind are worth retrying by default.
    pub fn default_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::RateLimited | Self::UpstreamError)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid_url",
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::ExtractionUnavailable => "extraction_unavailable",
            Self::UpstreamError => "upstream_error",
            Self::Internal => "internal",
        }
    }
}

/// A classified resolution failure.
///
/// `detail` is human-readable and safe to surface to clients: it never
/// carries stack traces, and diagnostics are redacted before assignment.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind:?} ({platform}): {detail}")]
pub struct ResolveError {
    pub kind: ErrorKind,
    pub platform: PlatformProfile,
    pub detail: String,
    pub retryable: bool,
}

impl ResolveError {
    pub fn new(kind: ErrorKind, platform: PlatformProfile, detail: impl Into<String>) -> Self {
        Self {
            kind,
            platform,
            detail: detail.into(),
            retryable: kind.default_retryable(),
        }
    }

    pub fn invalid_url(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUrl, PlatformProfile::Unsupported, detail)
    }

    pub fn unsupported(platform: PlatformProfile) -> Self {
        Self::new(
            ErrorKind::UnsupportedPlatform,
            platform,
            "This platform is not enabled on this server",
        )
    }

    pub fn timeout(platform: PlatformProfile, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, platform, detail)
    }

    pub fn rate_limited(platform: PlatformProfile, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, platform, detail)
    }

    pub fn unavailable(platform: PlatformProfile, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExtractionUnavailable, platform, detail)
    }

    pub fn upstream(platform: PlatformProfile, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamError, platform, detail)
    }

    pub fn internal(platform: PlatformProfile, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, platform, detail)
    }
}
