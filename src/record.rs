// src/record.rs
//
// Error Record - one immutable failure occurrence
//
// CRITICAL INVARIANTS:
// - `kind` is never `FailureKind::None` (construction panics)
// - All fields are immutable after construction
// - `with_layer` only overwrites `Layer::Unknown` (layer is sticky)
// - Message format is fixed:
//   "<KindMessage> on the <LayerMessage>[ because <reason>]"

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kind::FailureKind;
use crate::layer::Layer;

// ============================================================================
// TYPE TAG
// ============================================================================

/// Marker naming the output type a caller expected, captured from
/// `std::any::type_name`. Equality is by full name; messages use the
/// short name (module paths stripped, generic arguments kept).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag {
    full_name: String,
}

impl TypeTag {
    /// Capture the tag for `T`
    pub fn of<T: ?Sized>() -> Self {
        Self {
            full_name: std::any::type_name::<T>().to_string(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Short display name: `alloc::vec::Vec<alloc::string::String>`
    /// renders as `Vec<String>`
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.full_name.len());
        let mut segment = String::new();
        for ch in self.full_name.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                segment.push(ch);
            } else {
                push_last_path_component(&mut out, &segment);
                segment.clear();
                out.push(ch);
            }
        }
        push_last_path_component(&mut out, &segment);
        out
    }
}

fn push_last_path_component(out: &mut String, segment: &str) {
    match segment.rsplit("::").next() {
        Some(last) => out.push_str(last),
        None => out.push_str(segment),
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

// ============================================================================
// ERROR RECORD
// ============================================================================

/// One failure occurrence: kind + layer + optional reason + optional
/// expected-output-type marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    kind: FailureKind,
    layer: Layer,
    reason: Option<String>,
    expected_type: Option<TypeTag>,
}

impl ErrorRecord {
    /// Record without a reason.
    /// Panics if `kind` is `FailureKind::None`.
    pub fn new(kind: FailureKind, layer: Layer) -> Self {
        Self::build(kind, layer, None, None)
    }

    /// Record with a free-text "because ..." reason.
    /// Panics if `kind` is `FailureKind::None`.
    pub fn with_reason(kind: FailureKind, layer: Layer, reason: impl Into<String>) -> Self {
        Self::build(kind, layer, Some(reason.into()), None)
    }

    /// Record marked with the output type the caller expected, so the
    /// message reads e.g. "Episode not found" instead of
    /// "Resource not found".
    /// Panics if `kind` is `FailureKind::None`.
    pub fn for_type<T: ?Sized>(kind: FailureKind, layer: Layer, reason: Option<String>) -> Self {
        Self::build(kind, layer, reason, Some(TypeTag::of::<T>()))
    }

    fn build(
        kind: FailureKind,
        layer: Layer,
        reason: Option<String>,
        expected_type: Option<TypeTag>,
    ) -> Self {
        assert!(
            kind.is_failure(),
            "an ErrorRecord cannot carry FailureKind::None"
        );
        Self {
            kind,
            layer,
            reason,
            expected_type,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn expected_type(&self) -> Option<&TypeTag> {
        self.expected_type.as_ref()
    }

    /// Formatted message. Blank or whitespace-only reasons omit the
    /// "because" clause entirely.
    pub fn message(&self) -> String {
        let kind_message = match &self.expected_type {
            Some(tag) => self.kind.message_for(tag),
            None => self.kind.message().to_string(),
        };
        match self.reason.as_deref().map(str::trim) {
            Some(reason) if !reason.is_empty() => {
                format!("{} on the {} because {}", kind_message, self.layer.message(), reason)
            }
            _ => format!("{} on the {}", kind_message, self.layer.message()),
        }
    }

    /// Re-tag the layer. No-op unless the current layer is `Unknown`;
    /// once a record knows its layer it keeps it.
    pub fn with_layer(self, layer: Layer) -> Self {
        if self.layer.is_unknown() {
            Self { layer, ..self }
        } else {
            self
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
