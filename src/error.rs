//! Resolution errors
//!
//! Resolution fails in exactly two ways: two sources disagree on a field,
//! or the merged result breaks an invariant. Both abort the build; retrying
//! with the same input can never succeed.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// A field was declared with incompatible values by two sources
    #[error("Conflicting values for '{field}': {first} vs {second}")]
    ConfigConflict {
        field: String,
        first: Value,
        second: Value,
    },

    /// A validation invariant does not hold
    #[error("Invalid configuration: {invariant}")]
    ConfigInvalid { invariant: String },
}

impl ResolveError {
    pub fn conflict(field: impl Into<String>, first: impl Into<Value>, second: impl Into<Value>) -> Self {
        ResolveError::ConfigConflict {
            field: field.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn invalid(invariant: impl Into<String>) -> Self {
        ResolveError::ConfigInvalid {
            invariant: invariant.into(),
        }
    }

    /// The conflicting field name, if this is a conflict
    pub fn field(&self) -> Option<&str> {
        match self {
            ResolveError::ConfigConflict { field, .. } => Some(field),
            ResolveError::ConfigInvalid { .. } => None,
        }
    }
}
