//! Provider-facing domain types.
//!
//! A provider is any source of context the orchestrator fans a query out to.
//! The domain does not know how providers work; it only names them and
//! records what happened when they were called:
//!
//! - [`ProviderId`] - registration index plus display name
//! - [`ProviderError`] - typed failure of a single provider call
//! - [`ContextOutcome`] - per-provider result slot of one fan-out
//! - [`SourcedContext`] - a successful context tagged with its provider

mod error;
mod identity;
mod outcome;

pub use error::ProviderError;
pub use identity::ProviderId;
pub use outcome::{ContextOutcome, ProviderFailure, SourcedContext};
