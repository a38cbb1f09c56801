// src/convert.rs
//
// Layer-Conversion Combinators
//
// Promotion from one layer's result representation to the next is always
// an explicit call. The crate deliberately provides no From/Into
// conversions between result representations: re-tagging must be visible
// in the code at every layer boundary, never hidden in a cast.

use crate::kind::FailureKind;
use crate::layer::Layer;
use crate::record::ErrorRecord;

/// Read view over any result representation. Object-safe.
pub trait StatusLike {
    /// `FailureKind::None` iff the result is successful
    fn primary_kind(&self) -> FailureKind;

    /// Layer the result currently belongs to
    fn current_layer(&self) -> Layer;

    /// Accumulated error records, insertion order
    fn error_records(&self) -> &[ErrorRecord];

    fn is_failure(&self) -> bool {
        self.primary_kind().is_failure()
    }

    fn is_success(&self) -> bool {
        !self.is_failure()
    }
}

/// Constructor view over a result representation, used by aggregation
/// and promotion to build a result of the caller's chosen type.
pub trait StatusFactory: Sized {
    /// Successful result at the given layer (no output for typed
    /// representations)
    fn pass(layer: Layer) -> Self;

    /// Failed result carrying the given records. Panics if `kind` is
    /// `FailureKind::None`. An empty record list gets one synthesized
    /// record of `kind` so a failure never has zero errors.
    fn fail(kind: FailureKind, layer: Layer, errors: Vec<ErrorRecord>) -> Self;

    /// Copy from any result representation, optionally re-tagging
    /// errors whose layer is still `Unknown`. Typed representations
    /// panic on a successful source (there is no output to carry).
    fn from_status(source: &dyn StatusLike, new_layer: Option<Layer>) -> Self;
}

/// The cross-representation promotion step: copy `source` into `R`,
/// re-tagging `Unknown`-layer errors with `layer` and setting the
/// result's current layer.
pub fn promote<R: StatusFactory>(source: &dyn StatusLike, layer: Layer) -> R {
    R::from_status(source, Some(layer))
}
