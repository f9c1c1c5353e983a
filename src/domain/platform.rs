//! Platform profiles and URL classification.
//!
//! A platform profile identifies which site family an input URL belongs to,
//! which in turn selects extraction tuning, cache TTL, and concurrency
//! budget. Classification is pure pattern matching against a static host
//! signature table; unmatched hosts fall through to [`PlatformProfile::Generic`]
//! because the extraction backend handles hundreds of sites beyond the named
//! ones.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::domain::failure::ResolveError;
use crate::utils::url_norm::normalize_url;

/// Supported site family for an input URL.
///
/// Immutable once computed for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlatformProfile {
    YouTube,
    Facebook,
    Instagram,
    TikTok,
    /// Host matched no known signature; handled by the general-purpose
    /// extractor path.
    Generic,
    /// Profile exists but has been deliberately disabled via configuration.
    Unsupported,
}

impl PlatformProfile {
    /// All profiles that can be individually disabled.
    pub const ALL: &'static [PlatformProfile] = &[
        Self::YouTube,
        Self::Facebook,
        Self::Instagram,
        Self::TikTok,
        Self::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::TikTok => "tiktok",
            Self::Generic => "generic",
            Self::Unsupported => "unsupported",
        }
    }

    /// Parses a profile name as used in `DISABLED_PLATFORMS`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "youtube" => Some(Self::YouTube),
            "facebook" => Some(Self::Facebook),
            "instagram" => Some(Self::Instagram),
            "tiktok" => Some(Self::TikTok),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }

    /// Default cache TTL for results from this platform.
    ///
    /// Stream URL lifetimes are not publicly documented and vary per
    /// platform; these are conservative fractions (roughly one quarter) of
    /// typical observed expiry windows, and are policy values rather than
    /// guarantees. A global `CACHE_TTL_SECONDS` override replaces all of
    /// them.
    pub fn default_cache_ttl(&self) -> Duration {
        match self {
            // YouTube googlevideo URLs typically carry ~6h expiry stamps.
            Self::YouTube => Duration::from_secs(5400),
            Self::Facebook => Duration::from_secs(900),
            Self::Instagram => Duration::from_secs(600),
            Self::TikTok => Duration::from_secs(600),
            Self::Generic | Self::Unsupported => Duration::from_secs(300),
        }
    }
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host signature table, checked as exact match or `.`-separated suffix.
///
/// The most specific (longest) matching signature wins; ties are broken by
/// declaration order.
const SIGNATURES: &[(&str, PlatformProfile)] = &[
    ("youtube.com", PlatformProfile::YouTube),
    ("youtu.be", PlatformProfile::YouTube),
    ("music.youtube.com", PlatformProfile::YouTube),
    ("facebook.com", PlatformProfile::Facebook),
    ("fb.watch", PlatformProfile::Facebook),
    ("fb.com", PlatformProfile::Facebook),
    ("instagram.com", PlatformProfile::Instagram),
    ("instagr.am", PlatformProfile::Instagram),
    ("tiktok.com", PlatformProfile::TikTok),
    ("vm.tiktok.com", PlatformProfile::TikTok),
];

fn host_matches(host: &str, signature: &str) -> bool {
    host == signature || host.ends_with(&format!(".{signature}"))
}

/// Classifies input URLs into platform profiles and canonical cache keys.
///
/// Constructed once at startup from configuration; cheap to share.
#[derive(Debug, Clone, Default)]
pub struct UrlClassifier {
    disabled: HashSet<PlatformProfile>,
}

impl UrlClassifier {
    pub fn new(disabled: HashSet<PlatformProfile>) -> Self {
        Self { disabled }
    }

    /// Classifies a raw URL.
    ///
    /// Returns the matched profile ([`PlatformProfile::Unsupported`] when the
    /// matched profile is in the disabled set) together with the normalized
    /// URL used as the cache key.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] with [`ErrorKind::InvalidUrl`] for empty,
    /// non-HTTP(S), or unparsable input. No extraction is attempted for
    /// such URLs.
    ///
    /// [`ErrorKind::InvalidUrl`]: crate::domain::failure::ErrorKind::InvalidUrl
    pub fn classify(&self, raw_url: &str) -> Result<(PlatformProfile, String), ResolveError> {
        let normalized = normalize_url(raw_url)
            .map_err(|e| ResolveError::invalid_url(e.to_string()))?;

        // normalize_url guarantees an http(s) URL with a host
        let parsed = url::Url::parse(&normalized)
            .map_err(|e| ResolveError::invalid_url(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ResolveError::invalid_url("URL has no host".to_string()))?;

        let profile = SIGNATURES
            .iter()
            .filter(|(signature, _)| host_matches(host, signature))
            .max_by_key(|(signature, _)| signature.len())
            .map(|(_, profile)| *profile)
            .unwrap_or(PlatformProfile::Generic);

        if self.disabled.contains(&profile) {
            return Ok((PlatformProfile::Unsupported, normalized));
        }

        Ok((profile, normalized))
    }
}
