//! API middleware: rate limiting and request tracing.

pub mod rate_limit;
pub mod tracing;
