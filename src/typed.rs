// src/typed.rs
//
// Typed Result - ResultStatus plus an optional output value
//
// CRITICAL INVARIANTS:
// - `has_output() == true` implies `is_failure() == false`
// - `output()` is the only unchecked access path; on a result without
//   an output it panics with an "output access" message, distinct from
//   the original business failure, never silently returns a default
// - Failure records are stamped with the expected output type so
//   messages read "Episode not found" instead of "Resource not found"

use serde::{Deserialize, Serialize};

use crate::convert::{StatusFactory, StatusLike};
use crate::kind::FailureKind;
use crate::layer::Layer;
use crate::record::ErrorRecord;
use crate::status::ResultStatus;

/// Success-or-failure value carrying an output of type `T` on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedResult<T> {
    status: ResultStatus,
    output: Option<T>,
}

impl<T> TypedResult<T> {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Successful result carrying `value`
    pub fn success(value: T, layer: Layer) -> Self {
        Self {
            status: ResultStatus::success(layer),
            output: Some(value),
        }
    }

    /// Failed result. The record is stamped with `T` as the expected
    /// output type. Panics if `kind` is `FailureKind::None`.
    pub fn failure(kind: FailureKind, layer: Layer, reason: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::from_record(ErrorRecord::for_type::<T>(
                kind,
                layer,
                Some(reason.into()),
            )),
            output: None,
        }
    }

    /// Wrap a failed untyped status.
    /// Panics on a successful status: there is no output value to carry.
    pub fn from_status(status: ResultStatus) -> Self {
        assert!(
            status.is_failure(),
            "cannot build a TypedResult from a successful status: no output value to carry"
        );
        Self {
            status,
            output: None,
        }
    }

    /// Copy from another typed result, optionally promoting the layer.
    /// The output travels along when the source is successful.
    pub fn from_typed(other: TypedResult<T>, new_layer: Option<Layer>) -> Self {
        let status = ResultStatus::from_status(&other.status, new_layer);
        let output = if status.is_success() { other.output } else { None };
        Self { status, output }
    }

    /// Consuming promotion to the given layer, re-tagging only records
    /// still marked `Unknown`
    pub fn promote(self, layer: Layer) -> Self {
        Self {
            status: self.status.promote(layer),
            output: self.output,
        }
    }

    // ========================================================================
    // OUTPUT ACCESS
    // ========================================================================

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// The only unchecked access path. Panics with an "output access"
    /// message when no output is present; the panic is API misuse,
    /// distinct from the business failure the result carries.
    pub fn output(self) -> T {
        match self.output {
            Some(value) => value,
            None => {
                log::error!(
                    "output access on a result without an output: {}",
                    self.status.to_message_string()
                );
                panic!(
                    "output access on a result without an output (primary kind: {})",
                    self.status.primary_kind()
                );
            }
        }
    }

    pub fn try_output(&self) -> Option<&T> {
        self.output.as_ref()
    }

    pub fn into_output(self) -> Option<T> {
        self.output
    }

    pub fn output_or(self, default: T) -> T {
        self.output.unwrap_or(default)
    }

    pub fn output_or_default(self) -> T
    where
        T: Default,
    {
        self.output.unwrap_or_default()
    }

    // ========================================================================
    // COMBINATORS
    // ========================================================================

    /// Transform the output type. Failure state travels unchanged; `f`
    /// runs only on a present output.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypedResult<U> {
        TypedResult {
            status: self.status,
            output: self.output.map(f),
        }
    }

    /// Merge an untyped result into this one with `ResultStatus`
    /// semantics. The output is dropped when the combined state is a
    /// failure.
    pub fn combine_with(self, other: ResultStatus) -> Self {
        let status = self.status.combine_with(other);
        let output = if status.is_failure() { None } else { self.output };
        Self { status, output }
    }

    // ========================================================================
    // STATUS VIEW
    // ========================================================================

    pub fn status(&self) -> &ResultStatus {
        &self.status
    }

    pub fn into_status(self) -> ResultStatus {
        self.status
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn primary_kind(&self) -> FailureKind {
        self.status.primary_kind()
    }

    pub fn current_layer(&self) -> Layer {
        self.status.current_layer()
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        self.status.errors()
    }

    pub fn has_kind(&self, kind: FailureKind) -> bool {
        self.status.has_kind(kind)
    }

    pub fn to_message_string(&self) -> String {
        self.status.to_message_string()
    }
}

impl<T> StatusLike for TypedResult<T> {
    fn primary_kind(&self) -> FailureKind {
        self.status.primary_kind()
    }

    fn current_layer(&self) -> Layer {
        self.status.current_layer()
    }

    fn error_records(&self) -> &[ErrorRecord] {
        self.status.errors()
    }
}

impl<T> StatusFactory for TypedResult<T> {
    fn pass(layer: Layer) -> Self {
        Self {
            status: ResultStatus::success(layer),
            output: None,
        }
    }

    fn fail(kind: FailureKind, layer: Layer, errors: Vec<ErrorRecord>) -> Self {
        Self {
            status: ResultStatus::fail(kind, layer, errors),
            output: None,
        }
    }

    fn from_status(source: &dyn StatusLike, new_layer: Option<Layer>) -> Self {
        assert!(
            source.is_failure(),
            "cannot build a TypedResult from a successful status: no output value to carry"
        );
        Self {
            status: ResultStatus::from_status(source, new_layer),
            output: None,
        }
    }
}
