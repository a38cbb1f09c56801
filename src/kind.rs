// src/kind.rs
//
// Failure Kind Taxonomy
//
// Closed set of failure categories. `None` means "no failure" and is only
// ever valid as the primary kind of a successful result; it must never
// appear inside an ErrorRecord.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::TypeTag;

/// Why an operation failed. Closed set, never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No failure (successful result)
    None,

    /// Unclassified failure
    Generic,

    /// An entity or aggregate invariant was violated
    InvariantViolation,

    /// The caller cancelled before the operation ran
    OperationCancelled,

    /// The operation exceeded its time budget
    OperationTimeout,

    /// Concurrent modification detected (e.g. stale version)
    ConcurrencyViolation,

    /// The request as a whole was malformed
    InvalidRequest,

    /// One or more input values were invalid
    InvalidInput,

    /// A domain rule rejected the operation
    DomainViolation,

    /// The caller is not permitted to perform the operation
    NotAllowed,

    /// The requested resource does not exist
    NotFound,

    /// The resource already exists
    AlreadyExists,
}

impl FailureKind {
    /// Human-readable message template (untyped form)
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::None => "No failure",
            FailureKind::Generic => "Operation failed",
            FailureKind::InvariantViolation => "Invariant violated",
            FailureKind::OperationCancelled => "Operation cancelled",
            FailureKind::OperationTimeout => "Operation timed out",
            FailureKind::ConcurrencyViolation => "Concurrency violation",
            FailureKind::InvalidRequest => "Invalid request",
            FailureKind::InvalidInput => "Invalid input",
            FailureKind::DomainViolation => "Domain rule violated",
            FailureKind::NotAllowed => "Operation not allowed",
            FailureKind::NotFound => "Resource not found",
            FailureKind::AlreadyExists => "Resource already exists",
        }
    }

    /// Human-readable message template parameterized by the expected
    /// output type (e.g. `"Episode not found"` instead of
    /// `"Resource not found"`)
    pub fn message_for(&self, expected_type: &TypeTag) -> String {
        let name = expected_type.short_name();
        match self {
            FailureKind::None => self.message().to_string(),
            FailureKind::NotFound => format!("{} not found", name),
            FailureKind::AlreadyExists => format!("{} already exists", name),
            _ => format!("{} for {}", self.message(), name),
        }
    }

    /// Stable snake_case token, identical to the serde form
    pub fn token(&self) -> &'static str {
        match self {
            FailureKind::None => "none",
            FailureKind::Generic => "generic",
            FailureKind::InvariantViolation => "invariant_violation",
            FailureKind::OperationCancelled => "operation_cancelled",
            FailureKind::OperationTimeout => "operation_timeout",
            FailureKind::ConcurrencyViolation => "concurrency_violation",
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::DomainViolation => "domain_violation",
            FailureKind::NotAllowed => "not_allowed",
            FailureKind::NotFound => "not_found",
            FailureKind::AlreadyExists => "already_exists",
        }
    }

    /// True for every kind except `None`
    pub fn is_failure(&self) -> bool {
        *self != FailureKind::None
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
