// src/aggregate.rs
//
// Aggregation Helpers
//
// Fold a collection of results into one. `aggregate_to` reports every
// failing input under a caller-chosen fallback kind; `merge` keeps the
// first failing input's kind as primary.

use crate::convert::StatusFactory;
use crate::kind::FailureKind;
use crate::layer::Layer;
use crate::record::ErrorRecord;
use crate::status::ResultStatus;

/// Fold `results` into one result of type `R`.
///
/// Success iff every input is successful (vacuously for an empty
/// slice). Otherwise the aggregate fails with `fallback_kind` as
/// primary and the concatenation of all input records in input order;
/// successful entries contribute none. The aggregate's layer is the
/// first failing input's current layer.
pub fn aggregate_to<R: StatusFactory>(
    results: &[ResultStatus],
    fallback_kind: FailureKind,
) -> R {
    let mut errors: Vec<ErrorRecord> = Vec::new();
    let mut failed_layer: Option<Layer> = None;
    for result in results {
        if result.is_failure() {
            failed_layer.get_or_insert(result.current_layer());
            errors.extend(result.errors().iter().cloned());
        }
    }
    match failed_layer {
        Some(layer) => R::fail(fallback_kind, layer, errors),
        None => R::pass(
            results
                .first()
                .map(|result| result.current_layer())
                .unwrap_or(Layer::Unknown),
        ),
    }
}

/// Fold `combine_with` over `results` from a neutral success: the
/// primary kind is the first failing input's kind and all records are
/// concatenated in input order.
pub fn merge(results: impl IntoIterator<Item = ResultStatus>) -> ResultStatus {
    results
        .into_iter()
        .fold(ResultStatus::success(Layer::Unknown), |combined, result| {
            combined.combine_with(result)
        })
}
