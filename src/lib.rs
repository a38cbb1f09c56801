// src/lib.rs
// opresult - Layered result / error-propagation core
//
// Architecture:
// - Value-centric: a result is a plain immutable value, returned upward
//   instead of thrown
// - Layer as data: the architectural tier lives on the value, not in a
//   type hierarchy; promotion re-tags it explicitly
// - Explicit: no implicit conversions between representations, every
//   layer crossing is a visible call
// - Pure: no I/O, no shared state; combinators consume self and return
//   new values

pub mod aggregate;
pub mod boundary;
pub mod convert;
pub mod kind;
pub mod layer;
pub mod record;
pub mod status;
pub mod typed;

#[cfg(test)]
mod pipeline_tests;

// ============================================================================
// PUBLIC API - Taxonomy
// ============================================================================

pub use kind::FailureKind;
pub use layer::Layer;

// ============================================================================
// PUBLIC API - Values
// ============================================================================

pub use record::{ErrorRecord, TypeTag};
pub use status::ResultStatus;
pub use typed::TypedResult;

// ============================================================================
// PUBLIC API - Combinators
// ============================================================================

pub use aggregate::{aggregate_to, merge};
pub use convert::{promote, StatusFactory, StatusLike};

// ============================================================================
// PUBLIC API - Boundary bridge
// ============================================================================

pub use boundary::{ErrorReport, FailureDetail, OperationError};
