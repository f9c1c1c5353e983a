//! Request/response DTOs for the public API.

pub mod health;
pub mod resolve;
