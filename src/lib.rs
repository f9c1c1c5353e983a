//! # Stream Resolver
//!
//! A small HTTP service that resolves video page URLs (YouTube, Facebook,
//! Instagram, TikTok, and anything else the extractor understands) into
//! direct, playable stream URLs with lightweight metadata.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Platform profiles, resolution entities,
//!   and the failure taxonomy
//! - **Application Layer** ([`application`]) - Resolution coordination, result
//!   normalization, and admission control
//! - **Infrastructure Layer** ([`infrastructure`]) - The yt-dlp extraction
//!   backend and the in-memory cache
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Platform-aware URL classification with canonical cache keys
//! - Bounded extraction concurrency with per-platform fairness
//! - Timeout and retry policy around an external extractor process
//! - Ephemeral LRU cache with per-platform TTLs
//! - Uniform response envelope: every resolve answers `200` with
//!   `status: "success"` or `status: "error"`
//!
//! ## Quick Start
//!
//! ```bash
//! # yt-dlp must be on PATH (or set YTDLP_BIN)
//! cargo run
//!
//! curl -X POST localhost:8000/resolve \
//!   -H 'content-type: application/json' \
//!   -d '{"url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::admission::AdmissionController;
    pub use crate::application::resolver::{ResolvePolicy, ResolverService};
    pub use crate::domain::failure::{ErrorKind, ResolveError};
    pub use crate::domain::platform::{PlatformProfile, UrlClassifier};
    pub use crate::domain::resolution::VideoResolution;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
