// src/layer.rs
//
// Architectural Layer Tag
//
// The layer a failure was observed at is data on the result value, not a
// position in a type hierarchy. `Unknown` is the default at creation and
// the only value a later promotion step may overwrite.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Architectural tier where a failure originated or was re-tagged.
/// Totally ordered: `Unknown < Infrastructure < Service < UseCase < Web`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Unknown,
    Infrastructure,
    Service,
    UseCase,
    Web,
}

impl Layer {
    /// Human-readable message fragment used in error formatting
    pub fn message(&self) -> &'static str {
        match self {
            Layer::Unknown => "Unknown layer",
            Layer::Infrastructure => "Infrastructure layer",
            Layer::Service => "Service layer",
            Layer::UseCase => "UseCase layer",
            Layer::Web => "Web layer",
        }
    }

    /// Stable snake_case token, identical to the serde form
    pub fn token(&self) -> &'static str {
        match self {
            Layer::Unknown => "unknown",
            Layer::Infrastructure => "infrastructure",
            Layer::Service => "service",
            Layer::UseCase => "use_case",
            Layer::Web => "web",
        }
    }

    /// The layer a promotion step targets. `Web` is terminal and yields
    /// itself.
    pub fn next(&self) -> Layer {
        match self {
            Layer::Unknown => Layer::Infrastructure,
            Layer::Infrastructure => Layer::Service,
            Layer::Service => Layer::UseCase,
            Layer::UseCase => Layer::Web,
            Layer::Web => Layer::Web,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Layer::Unknown
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
