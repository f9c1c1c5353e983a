//! DTOs for the resolve endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::resolution::VideoResolution;

/// Request to resolve a video page URL.
///
/// Only structural bounds are validated here (and rejected with a non-200
/// transport error); whether the string is a usable URL is the engine's
/// decision and comes back as a 200 envelope with `status: "error"`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveRequest {
    /// The page URL to resolve.
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub url: String,
}

/// Uniform response envelope: always HTTP 200 for resolution outcomes so
/// client handling stays identical across platforms and failure modes.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VideoData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResolveResponse {
    pub fn success(data: VideoData) -> Self {
        Self {
            status: "success",
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Resolved video payload.
///
/// `thumbnail` and `duration` serialize as explicit `null` when absent;
/// clients key off their presence.
#[derive(Debug, Serialize)]
pub struct VideoData {
    pub title: String,
    pub thumbnail: Option<String>,
    pub duration: Option<u64>,
    pub stream_url: String,
}

impl From<VideoResolution> for VideoData {
    fn from(resolution: VideoResolution) -> Self {
        Self {
            title: resolution.title,
            thumbnail: resolution.thumbnail_url,
            duration: resolution.duration_seconds,
            stream_url: resolution.stream_url,
        }
    }
}
