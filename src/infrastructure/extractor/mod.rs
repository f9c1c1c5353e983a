//! Extraction backend interface.
//!
//! A backend is a black-box capability: given a video page URL it either
//! returns loosely-typed metadata ([`RawExtraction`]) or fails with a
//! diagnostic the normalizer can classify. The engine treats all backends
//! uniformly.

mod ytdlp;

pub use ytdlp::YtDlpExtractor;

use async_trait::async_trait;

use crate::domain::platform::PlatformProfile;
use crate::domain::resolution::RawExtraction;

/// Per-request extraction options.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Platform profile the URL was classified into; selects per-site
    /// extractor tuning.
    pub platform: PlatformProfile,
}

/// Errors surfaced by an extraction backend.
///
/// `Extractor` carries the raw diagnostic text (e.g. yt-dlp stderr); it is
/// untrusted and must pass through the normalizer's classification and
/// redaction before reaching a client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("extractor binary not available: {0}")]
    NotInstalled(String),

    #[error("failed to run extractor: {0}")]
    Io(String),

    #[error("extractor failed: {diagnostic}")]
    Extractor { diagnostic: String },

    #[error("extractor produced unparsable output: {0}")]
    InvalidOutput(String),
}

/// Abstract extraction capability.
///
/// Implementations must be safe for concurrent use; one call maps to one
/// extraction attempt and must stop doing work when the returned future is
/// dropped (the coordinator cancels abandoned attempts).
///
/// # Implementations
///
/// - [`YtDlpExtractor`] - yt-dlp subprocess backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Name of the backend (for logging).
    fn name(&self) -> &'static str;

    /// Extracts metadata and a direct stream URL without downloading media.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on spawn failure, extractor failure (with
    /// the raw diagnostic), or unparsable output. Timeouts are enforced by
    /// the caller, not here.
    async fn extract(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<RawExtraction, BackendError>;

    /// Whether the backend is usable right now. Used by health checks.
    async fn is_available(&self) -> bool;
}
