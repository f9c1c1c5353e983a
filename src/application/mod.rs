//! Application services: the resolution coordinator, the result
//! normalizer, and the admission controller.

pub mod admission;
pub mod normalizer;
pub mod resolver;

pub use admission::{AdmissionController, AdmissionSlot};
pub use resolver::{ResolvePolicy, ResolverService};
