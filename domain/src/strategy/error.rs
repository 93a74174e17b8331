//! Strategy-level errors

use crate::providers::ProviderId;
use thiserror::Error;

/// Errors raised while combining contexts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    #[error("Merge conflict on key '{key}' between {first} and {second}")]
    MergeConflict {
        key: String,
        first: ProviderId,
        second: ProviderId,
    },

    #[error("Context from {provider} is not a key-value mapping")]
    NotAMapping { provider: ProviderId },

    #[error("Failed to serialize context from {provider}: {message}")]
    Serialization { provider: ProviderId, message: String },
}

impl CombineError {
    /// The colliding key, if this is a merge conflict
    pub fn conflicting_key(&self) -> Option<&str> {
        match self {
            CombineError::MergeConflict { key, .. } => Some(key),
            _ => None,
        }
    }
}
