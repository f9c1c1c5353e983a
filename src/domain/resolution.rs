//! Resolution result entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A successfully resolved video: metadata plus a direct, time-limited
/// stream URL.
///
/// Invariants: `stream_url` is non-empty and syntactically a URL;
/// `resolved_at` is not in the future. Cached copies are replaced wholesale
/// on re-resolution, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoResolution {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: Option<u64>,
    pub stream_url: String,
    pub resolved_at: DateTime<Utc>,
    /// Best-effort estimate of when `stream_url` stops working, parsed from
    /// CDN expiry stamps when present.
    pub expires_estimate_at: Option<DateTime<Utc>>,
}

/// Raw extractor output, mirroring the loosely-typed JSON that yt-dlp
/// emits with `--dump-single-json`.
///
/// Every field is optional on the wire; the normalizer decides what is
/// required. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExtraction {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Fractional seconds; some platforms (Instagram) report decimals.
    pub duration: Option<f64>,
    /// Direct media URL, present when the extractor already picked a format.
    pub url: Option<String>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// One entry of the extractor's format list. Only the URL matters here;
/// format selection happened upstream via `--format best`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    pub url: Option<String>,
}

impl RawExtraction {
    /// Picks the playable stream URL from the raw output.
    ///
    /// Prefers the top-level `url`; otherwise scans the format list from the
    /// tail (yt-dlp orders formats worst-first, so the best candidates are
    /// last) for the first entry that carries a URL.
    pub fn best_stream_url(&self) -> Option<&str> {
        if let Some(url) = self.url.as_deref()
            && !url.is_empty()
        {
            return Some(url);
        }

        self.formats
            .iter()
            .rev()
            .find_map(|format| format.url.as_deref().filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_stream_url_prefers_top_level() {
        let raw = RawExtraction {
            url: Some("https://cdn/top".to_string()),
            formats: vec![RawFormat {
                url: Some("https://cdn/format".to_string()),
            }],
            ..Default::default()
        };
        assert_eq!(raw.best_stream_url(), Some("https://cdn/top"));
    }

    #[test]
    fn test_best_stream_url_scans_formats_from_tail() {
        let raw = RawExtraction {
            formats: vec![
                RawFormat {
                    url: Some("https://cdn/worst".to_string()),
                },
                RawFormat {
                    url: Some("https://cdn/best".to_string()),
                },
                RawFormat { url: None },
            ],
            ..Default::default()
        };
        assert_eq!(raw.best_stream_url(), Some("https://cdn/best"));
    }

    #[test]
    fn test_best_stream_url_absent() {
        let raw = RawExtraction::default();
        assert_eq!(raw.best_stream_url(), None);

        let raw = RawExtraction {
            url: Some(String::new()),
            formats: vec![RawFormat { url: None }],
            ..Default::default()
        };
        assert_eq!(raw.best_stream_url(), None);
    }

    #[test]
    fn test_raw_extraction_parses_ytdlp_json() {
        let raw: RawExtraction = serde_json::from_str(
            r#"{
                "id": "dQw4w9WgXcQ",
                "title": "T",
                "duration": 213.0,
                "thumbnail": "https://i.ytimg.com/t.jpg",
                "formats": [{"format_id": "18", "url": "https://cdn/x"}],
                "extractor": "youtube"
            }"#,
        )
        .unwrap();
        assert_eq!(raw.title.as_deref(), Some("T"));
        assert_eq!(raw.duration, Some(213.0));
        assert_eq!(raw.best_stream_url(), Some("https://cdn/x"));
    }
}
