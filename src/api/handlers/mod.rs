//! API request handlers.

mod health;
mod resolve;
mod root;

pub use health::health_handler;
pub use resolve::resolve_handler;
pub use root::root_handler;
