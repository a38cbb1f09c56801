// src/boundary.rs
//
// Boundary Error Bridge
//
// Two-way mapping between a failed result and a `std::error::Error`
// value, used only at explicit boundary calls to interoperate with
// `Result<_, E>`/`?`-based and legacy call sites. The core's own
// combinators never construct an OperationError.
//
// `ErrorReport` is the serializable envelope handed to web and logging
// collaborators; mapping a kind to a transport status code stays
// outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::convert::StatusFactory;
use crate::kind::FailureKind;
use crate::layer::Layer;
use crate::record::ErrorRecord;
use crate::status::ResultStatus;
use crate::typed::TypedResult;

// ============================================================================
// FAILURE DETAIL
// ============================================================================

/// Snapshot of a failed result carried inside an OperationError, enough
/// to reconstruct the exact original on the other side of the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub layer: Layer,
    pub message: String,
    pub errors: Vec<ErrorRecord>,
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// OPERATION ERROR
// ============================================================================

/// Boundary error type, one variant per failure kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("Operation failed: {0}")]
    Generic(FailureDetail),

    #[error("Invariant violated: {0}")]
    InvariantViolation(FailureDetail),

    #[error("Operation cancelled: {0}")]
    OperationCancelled(FailureDetail),

    #[error("Operation timed out: {0}")]
    OperationTimeout(FailureDetail),

    #[error("Concurrency violation: {0}")]
    ConcurrencyViolation(FailureDetail),

    #[error("Invalid request: {0}")]
    InvalidRequest(FailureDetail),

    #[error("Invalid input: {0}")]
    InvalidInput(FailureDetail),

    #[error("Domain rule violated: {0}")]
    DomainViolation(FailureDetail),

    #[error("Operation not allowed: {0}")]
    NotAllowed(FailureDetail),

    #[error("Resource not found: {0}")]
    NotFound(FailureDetail),

    #[error("Resource already exists: {0}")]
    AlreadyExists(FailureDetail),
}

impl OperationError {
    /// Select the variant for `kind`.
    /// Panics if `kind` is `FailureKind::None`.
    pub fn new(kind: FailureKind, detail: FailureDetail) -> Self {
        match kind {
            FailureKind::None => {
                panic!("an OperationError cannot carry FailureKind::None")
            }
            FailureKind::Generic => Self::Generic(detail),
            FailureKind::InvariantViolation => Self::InvariantViolation(detail),
            FailureKind::OperationCancelled => Self::OperationCancelled(detail),
            FailureKind::OperationTimeout => Self::OperationTimeout(detail),
            FailureKind::ConcurrencyViolation => Self::ConcurrencyViolation(detail),
            FailureKind::InvalidRequest => Self::InvalidRequest(detail),
            FailureKind::InvalidInput => Self::InvalidInput(detail),
            FailureKind::DomainViolation => Self::DomainViolation(detail),
            FailureKind::NotAllowed => Self::NotAllowed(detail),
            FailureKind::NotFound => Self::NotFound(detail),
            FailureKind::AlreadyExists => Self::AlreadyExists(detail),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Generic(_) => FailureKind::Generic,
            Self::InvariantViolation(_) => FailureKind::InvariantViolation,
            Self::OperationCancelled(_) => FailureKind::OperationCancelled,
            Self::OperationTimeout(_) => FailureKind::OperationTimeout,
            Self::ConcurrencyViolation(_) => FailureKind::ConcurrencyViolation,
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
            Self::InvalidInput(_) => FailureKind::InvalidInput,
            Self::DomainViolation(_) => FailureKind::DomainViolation,
            Self::NotAllowed(_) => FailureKind::NotAllowed,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::AlreadyExists(_) => FailureKind::AlreadyExists,
        }
    }

    pub fn detail(&self) -> &FailureDetail {
        match self {
            Self::Generic(d)
            | Self::InvariantViolation(d)
            | Self::OperationCancelled(d)
            | Self::OperationTimeout(d)
            | Self::ConcurrencyViolation(d)
            | Self::InvalidRequest(d)
            | Self::InvalidInput(d)
            | Self::DomainViolation(d)
            | Self::NotAllowed(d)
            | Self::NotFound(d)
            | Self::AlreadyExists(d) => d,
        }
    }

    pub fn into_detail(self) -> FailureDetail {
        match self {
            Self::Generic(d)
            | Self::InvariantViolation(d)
            | Self::OperationCancelled(d)
            | Self::OperationTimeout(d)
            | Self::ConcurrencyViolation(d)
            | Self::InvalidRequest(d)
            | Self::InvalidInput(d)
            | Self::DomainViolation(d)
            | Self::NotAllowed(d)
            | Self::NotFound(d)
            | Self::AlreadyExists(d) => d,
        }
    }

    pub fn layer(&self) -> Layer {
        self.detail().layer
    }

    pub fn boundary_message(&self) -> &str {
        &self.detail().message
    }

    /// Reconstruct the exact failed status this error was built from:
    /// same primary kind, layer, and error records.
    pub fn into_status(self) -> ResultStatus {
        let kind = self.kind();
        let detail = self.into_detail();
        log::debug!(
            "reconstructing result from boundary error: {} on the {}",
            kind,
            detail.layer
        );
        ResultStatus::fail(kind, detail.layer, detail.errors)
    }
}

impl Serialize for OperationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// ============================================================================
// STATUS <-> ERROR CONVERSIONS
// ============================================================================

impl ResultStatus {
    /// Convert a failed status into the boundary error for its primary
    /// kind. `message` overrides the default newline-joined record
    /// messages.
    /// Panics on a successful status.
    pub fn into_error(self, message: Option<String>) -> OperationError {
        assert!(
            self.is_failure(),
            "cannot convert a successful result into an OperationError"
        );
        let kind = self.primary_kind();
        let layer = self.current_layer();
        let message = message.unwrap_or_else(|| self.to_message_string());
        log::debug!("result crossing boundary as {}: {}", kind, message);
        OperationError::new(
            kind,
            FailureDetail {
                layer,
                message,
                errors: self.into_errors(),
            },
        )
    }

    /// Single-record failure from a foreign error that carries only
    /// text.
    pub fn from_error(kind: FailureKind, layer: Layer, message: impl Into<String>) -> Self {
        log::debug!("foreign error entering as {} on the {}", kind, layer);
        Self::failure(kind, layer, message)
    }
}

impl<T> TypedResult<T> {
    /// Bridge into `Result` for `?`-based call sites. Panics with an
    /// "output access" message on a successful result that carries no
    /// output.
    pub fn into_result(self) -> Result<T, OperationError> {
        if self.is_failure() {
            Err(self.into_status().into_error(None))
        } else {
            Ok(self.output())
        }
    }

    /// Bridge back from `Result`; a successful value lands at
    /// `success_layer`, an error reconstructs the failed status it
    /// carries.
    pub fn from_result(result: Result<T, OperationError>, success_layer: Layer) -> Self {
        match result {
            Ok(value) => Self::success(value, success_layer),
            Err(error) => Self::from_status(error.into_status()),
        }
    }
}

// ============================================================================
// ERROR REPORT
// ============================================================================

/// Serializable snapshot of a result for web and logging collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub success: bool,
    pub kind: FailureKind,
    pub layer: Layer,
    pub messages: Vec<String>,
    pub reported_at: DateTime<Utc>,
}

impl ErrorReport {
    pub fn from_status(status: &ResultStatus) -> Self {
        Self {
            success: status.is_success(),
            kind: status.primary_kind(),
            layer: status.current_layer(),
            messages: status.errors().iter().map(|record| record.message()).collect(),
            reported_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"kind":"generic","layer":"unknown","messages":["error report serialization failed"]}"#
                .to_string()
        })
    }
}
