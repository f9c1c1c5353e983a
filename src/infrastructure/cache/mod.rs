//! Ephemeral result cache implementations.

mod memory;
mod null;
mod service;

pub use memory::MemoryCache;
pub use null::NullCache;
pub use service::ResolutionCache;
