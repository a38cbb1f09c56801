// src/status.rs
//
// Result Status - the untyped success/failure value
//
// CRITICAL INVARIANTS:
// - `is_failure() == (primary_kind != FailureKind::None)`
// - `errors` is empty iff the result is successful
// - A status built by `failure` or grown by `combine_with` keeps its
//   first-inserted record's kind equal to `primary_kind` (aggregation
//   with a fallback kind deliberately relaxes this)
// - Every combinator consumes `self` and returns a new value; no
//   in-place mutation escapes this module

use serde::{Deserialize, Serialize};

use crate::convert::{StatusFactory, StatusLike};
use crate::kind::FailureKind;
use crate::layer::Layer;
use crate::record::{ErrorRecord, TypeTag};

/// Success-or-failure value with accumulated error records and a
/// primary failure kind. Returned upward through the layers instead of
/// panicking or bubbling ad-hoc errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultStatus {
    primary_kind: FailureKind,
    current_layer: Layer,
    errors: Vec<ErrorRecord>,
}

impl ResultStatus {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Successful result at the given layer
    pub fn success(layer: Layer) -> Self {
        Self {
            primary_kind: FailureKind::None,
            current_layer: layer,
            errors: Vec::new(),
        }
    }

    /// Failed result with a single record.
    /// Panics if `kind` is `FailureKind::None`.
    pub fn failure(kind: FailureKind, layer: Layer, reason: impl Into<String>) -> Self {
        Self::from_record(ErrorRecord::with_reason(kind, layer, reason))
    }

    /// Failed result wrapping one existing record
    pub fn from_record(record: ErrorRecord) -> Self {
        Self {
            primary_kind: record.kind(),
            current_layer: record.layer(),
            errors: vec![record],
        }
    }

    /// Copy from any result representation. With `Some(layer)` every
    /// copied record still tagged `Unknown` is re-tagged and the new
    /// status belongs to `layer`; with `None` the layer is copied
    /// unchanged. This is the layer-promotion primitive.
    pub fn from_status(other: &dyn StatusLike, new_layer: Option<Layer>) -> Self {
        let (current_layer, errors) = match new_layer {
            Some(layer) => (
                layer,
                other
                    .error_records()
                    .iter()
                    .cloned()
                    .map(|record| record.with_layer(layer))
                    .collect(),
            ),
            None => (other.current_layer(), other.error_records().to_vec()),
        };
        Self {
            primary_kind: other.primary_kind(),
            current_layer,
            errors,
        }
    }

    /// Consuming form of the promotion primitive
    pub fn promote(mut self, layer: Layer) -> Self {
        self.errors = self
            .errors
            .into_iter()
            .map(|record| record.with_layer(layer))
            .collect();
        self.current_layer = layer;
        self
    }

    // ========================================================================
    // COMBINATION
    // ========================================================================

    /// Merge another result into this one:
    /// - both successful: unchanged
    /// - self failed, other successful: unchanged
    /// - self successful, other failed: other's primary kind is adopted
    /// - both failed: primary kind unchanged (first failure wins)
    ///
    /// In every failing branch, other's records are appended in order,
    /// each re-tagged with this result's current layer if still
    /// `Unknown`.
    pub fn combine_with(mut self, other: ResultStatus) -> Self {
        if other.is_success() {
            return self;
        }
        if self.is_success() {
            self.primary_kind = other.primary_kind;
        }
        let tag = self.current_layer;
        self.errors
            .extend(other.errors.into_iter().map(|record| record.with_layer(tag)));
        self
    }

    /// Fold `combine_with` over a sequence. Input order determines the
    /// order of appended records but never changes an established
    /// primary kind.
    pub fn combine_with_many(self, others: impl IntoIterator<Item = ResultStatus>) -> Self {
        others
            .into_iter()
            .fold(self, |combined, other| combined.combine_with(other))
    }

    /// Append one record per message, each carrying the primary kind
    /// and current layer.
    /// Panics if the result is currently successful: there is no
    /// failure to attach text to.
    pub fn add_error_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(
            self.is_failure(),
            "cannot attach error messages to a successful result"
        );
        for message in messages {
            self.errors.push(ErrorRecord::with_reason(
                self.primary_kind,
                self.current_layer,
                message,
            ));
        }
        self
    }

    /// Single-message form of `add_error_messages`
    pub fn add_error_message(self, message: impl Into<String>) -> Self {
        self.add_error_messages([message.into()])
    }

    // ========================================================================
    // ACCESSORS & PREDICATES
    // ========================================================================

    pub fn primary_kind(&self) -> FailureKind {
        self.primary_kind
    }

    pub fn current_layer(&self) -> Layer {
        self.current_layer
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.errors
    }

    pub fn is_failure(&self) -> bool {
        self.primary_kind.is_failure()
    }

    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    /// Does any accumulated record carry this kind? Merged results may
    /// carry several kinds besides the primary one.
    pub fn has_kind(&self, kind: FailureKind) -> bool {
        self.errors.iter().any(|record| record.kind() == kind)
    }

    pub fn is_generic_failure(&self) -> bool {
        self.has_kind(FailureKind::Generic)
    }

    pub fn is_invariant_violation(&self) -> bool {
        self.has_kind(FailureKind::InvariantViolation)
    }

    pub fn operation_cancelled(&self) -> bool {
        self.has_kind(FailureKind::OperationCancelled)
    }

    pub fn operation_timed_out(&self) -> bool {
        self.has_kind(FailureKind::OperationTimeout)
    }

    pub fn is_concurrency_violation(&self) -> bool {
        self.has_kind(FailureKind::ConcurrencyViolation)
    }

    pub fn is_invalid_request(&self) -> bool {
        self.has_kind(FailureKind::InvalidRequest)
    }

    pub fn is_invalid_input(&self) -> bool {
        self.has_kind(FailureKind::InvalidInput)
    }

    pub fn is_domain_violation(&self) -> bool {
        self.has_kind(FailureKind::DomainViolation)
    }

    pub fn is_not_allowed(&self) -> bool {
        self.has_kind(FailureKind::NotAllowed)
    }

    pub fn is_not_found(&self) -> bool {
        self.has_kind(FailureKind::NotFound)
    }

    pub fn already_exists(&self) -> bool {
        self.has_kind(FailureKind::AlreadyExists)
    }

    // ========================================================================
    // FILTERS
    // ========================================================================

    pub fn errors_by_kind(&self, kind: FailureKind) -> Vec<&ErrorRecord> {
        self.errors
            .iter()
            .filter(|record| record.kind() == kind)
            .collect()
    }

    pub fn errors_by_layer(&self, layer: Layer) -> Vec<&ErrorRecord> {
        self.errors
            .iter()
            .filter(|record| record.layer() == layer)
            .collect()
    }

    /// Records whose expected output type is `T`
    pub fn errors_of_type<T: ?Sized>(&self) -> Vec<&ErrorRecord> {
        let tag = TypeTag::of::<T>();
        self.errors
            .iter()
            .filter(|record| record.expected_type() == Some(&tag))
            .collect()
    }

    /// All record messages joined by newlines, insertion order. This is
    /// the surface a logging collaborator consumes.
    pub fn to_message_string(&self) -> String {
        self.errors
            .iter()
            .map(|record| record.message())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StatusLike for ResultStatus {
    fn primary_kind(&self) -> FailureKind {
        self.primary_kind
    }

    fn current_layer(&self) -> Layer {
        self.current_layer
    }

    fn error_records(&self) -> &[ErrorRecord] {
        &self.errors
    }
}

impl StatusFactory for ResultStatus {
    fn pass(layer: Layer) -> Self {
        Self::success(layer)
    }

    fn fail(kind: FailureKind, layer: Layer, errors: Vec<ErrorRecord>) -> Self {
        assert!(
            kind.is_failure(),
            "a failed ResultStatus cannot carry FailureKind::None"
        );
        let errors = if errors.is_empty() {
            vec![ErrorRecord::new(kind, layer)]
        } else {
            errors
        };
        Self {
            primary_kind: kind,
            current_layer: layer,
            errors,
        }
    }

    fn from_status(source: &dyn StatusLike, new_layer: Option<Layer>) -> Self {
        ResultStatus::from_status(source, new_layer)
    }
}
