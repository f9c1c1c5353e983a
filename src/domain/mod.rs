//! Core domain types: platform profiles, resolution results, and the
//! failure taxonomy.

pub mod failure;
pub mod platform;
pub mod resolution;

pub use failure::{ErrorKind, ResolveError};
pub use platform::{PlatformProfile, UrlClassifier};
pub use resolution::{RawExtraction, RawFormat, VideoResolution};
