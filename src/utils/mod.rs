//! Shared helpers used across layers.

pub mod url_norm;
