//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Variables
//!
//! All optional, with conservative defaults:
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `YTDLP_BIN` - Extractor binary name or path (default: `yt-dlp`)
//! - `EXTRACT_TIMEOUT_SECONDS` - Per-attempt extraction budget (default: 30)
//! - `MAX_ATTEMPTS` - Total extraction attempts per request (default: 3)
//! - `CACHE_CAPACITY` - Max cached resolutions, 0 disables caching (default: 1024)
//! - `CACHE_TTL_SECONDS` - Global TTL override; unset means per-platform defaults
//! - `MAX_INFLIGHT` - Global concurrent extraction bound (default: 16)
//! - `MAX_INFLIGHT_PER_PLATFORM` - Per-platform bound (default: 4)
//! - `ADMISSION_WAIT_MS` - Bounded wait for an extraction slot (default: 2000)
//! - `DISABLED_PLATFORMS` - Comma-separated profile names to reject
//!   (e.g. `tiktok,facebook`)

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::platform::PlatformProfile;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Extractor binary name or absolute path.
    pub ytdlp_bin: String,
    /// Wall-clock budget for a single extraction attempt, in seconds.
    pub extract_timeout_seconds: u64,
    /// Total extraction attempts for retryable failures (1 initial + retries).
    pub max_attempts: usize,
    /// Maximum number of cached resolutions. 0 disables caching entirely.
    pub cache_capacity: usize,
    /// Global cache TTL override in seconds. When `None`, each platform's
    /// conservative default applies; stream URLs expire, so this must stay
    /// short either way.
    pub cache_ttl_seconds: Option<u64>,
    /// Global bound on concurrent extraction subprocesses.
    pub max_inflight: usize,
    /// Per-platform bound on concurrent extractions.
    pub max_inflight_per_platform: usize,
    /// How long admission may wait for a free slot before rejecting.
    pub admission_wait_ms: u64,
    /// Platform profiles deliberately turned off on this deployment.
    pub disabled_platforms: HashSet<PlatformProfile>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DISABLED_PLATFORMS` names an unknown profile.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let ytdlp_bin = env::var("YTDLP_BIN").unwrap_or_else(|_| "yt-dlp".to_string());

        let extract_timeout_seconds = env::var("EXTRACT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let max_attempts = env::var("MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let cache_capacity = env::var("CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok());

        let max_inflight = env::var("MAX_INFLIGHT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(16);

        let max_inflight_per_platform = env::var("MAX_INFLIGHT_PER_PLATFORM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let admission_wait_ms = env::var("ADMISSION_WAIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000);

        let disabled_platforms = Self::load_disabled_platforms()
            .context("Failed to parse DISABLED_PLATFORMS")?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            ytdlp_bin,
            extract_timeout_seconds,
            max_attempts,
            cache_capacity,
            cache_ttl_seconds,
            max_inflight,
            max_inflight_per_platform,
            admission_wait_ms,
            disabled_platforms,
        })
    }

    fn load_disabled_platforms() -> Result<HashSet<PlatformProfile>> {
        let Ok(raw) = env::var("DISABLED_PLATFORMS") else {
            return Ok(HashSet::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                PlatformProfile::parse(name)
                    .with_context(|| format!("Unknown platform profile '{name}'"))
            })
            .collect()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is out of its sane range.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.extract_timeout_seconds == 0 || self.extract_timeout_seconds > 300 {
            anyhow::bail!(
                "EXTRACT_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.extract_timeout_seconds
            );
        }

        if self.max_attempts == 0 || self.max_attempts > 10 {
            anyhow::bail!(
                "MAX_ATTEMPTS must be between 1 and 10, got {}",
                self.max_attempts
            );
        }

        if let Some(ttl) = self.cache_ttl_seconds {
            // Stream URLs are time-limited; an unbounded or day-long cache
            // would serve dead links.
            if ttl == 0 || ttl > 21_600 {
                anyhow::bail!("CACHE_TTL_SECONDS must be between 1 and 21600, got {}", ttl);
            }
        }

        if self.max_inflight == 0 {
            anyhow::bail!("MAX_INFLIGHT must be at least 1");
        }

        if self.max_inflight_per_platform == 0
            || self.max_inflight_per_platform > self.max_inflight
        {
            anyhow::bail!(
                "MAX_INFLIGHT_PER_PLATFORM must be between 1 and MAX_INFLIGHT ({}), got {}",
                self.max_inflight,
                self.max_inflight_per_platform
            );
        }

        if self.admission_wait_ms > 60_000 {
            anyhow::bail!(
                "ADMISSION_WAIT_MS must be at most 60000, got {}",
                self.admission_wait_ms
            );
        }

        Ok(())
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.cache_capacity > 0
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_seconds)
    }

    pub fn admission_wait(&self) -> Duration {
        Duration::from_millis(self.admission_wait_ms)
    }

    pub fn cache_ttl_override(&self) -> Option<Duration> {
        self.cache_ttl_seconds.map(Duration::from_secs)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Extractor: {}", self.ytdlp_bin);
        tracing::info!(
            "  Extraction: {}s timeout, {} attempts",
            self.extract_timeout_seconds,
            self.max_attempts
        );

        if self.is_cache_enabled() {
            match self.cache_ttl_seconds {
                Some(ttl) => tracing::info!(
                    "  Cache: {} entries, {}s TTL",
                    self.cache_capacity,
                    ttl
                ),
                None => tracing::info!(
                    "  Cache: {} entries, per-platform TTL",
                    self.cache_capacity
                ),
            }
        } else {
            tracing::info!("  Cache: disabled");
        }

        tracing::info!(
            "  Concurrency: {} in-flight ({} per platform), {}ms admission wait",
            self.max_inflight,
            self.max_inflight_per_platform,
            self.admission_wait_ms
        );

        if !self.disabled_platforms.is_empty() {
            let mut names: Vec<_> = self
                .disabled_platforms
                .iter()
                .map(|p| p.as_str())
                .collect();
            names.sort_unstable();
            tracing::info!("  Disabled platforms: {}", names.join(", "));
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
