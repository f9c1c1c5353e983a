//! External integrations: the extraction backend and the result cache.

pub mod cache;
pub mod extractor;
