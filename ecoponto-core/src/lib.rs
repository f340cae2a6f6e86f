//! Core types and state machines for the ecoponto collection-point client.

/// Multi-select state over the collection category catalog.
pub mod categories;
/// Point detail state machine and contact-intent composition.
pub mod detail;
/// Domain models and identifiers shared by all providers.
pub mod model;
/// Traits describing the external collaborator interfaces.
pub mod ports;
/// Map coordinate capture (initial seed vs explicit selection).
pub mod position;
/// Validation and submission of new collection points.
pub mod registration;
/// Region/locality cascade with stale-response protection.
pub mod selection;
/// High-level service facade used by clients.
pub mod service;

pub use categories::*;
pub use detail::*;
pub use model::*;
pub use ports::*;
pub use position::*;
pub use registration::*;
pub use selection::*;
pub use service::*;
