//! Provider call errors

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure of a single provider `fetch` or `update` call.
///
/// Every fault a provider can produce is converted into one of these at the
/// call boundary, including timeouts and panics, so that sibling calls are
/// never affected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProviderError {
    #[error("Provider failed: {0}")]
    Failed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Provider panicked: {0}")]
    Panicked(String),

    #[error("Update not supported")]
    Unsupported,

    #[error("Call cancelled")]
    Cancelled,
}

impl ProviderError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this error is a deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}
