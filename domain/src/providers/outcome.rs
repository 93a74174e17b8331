//! Per-provider outcomes of a fan-out

use super::{ProviderError, ProviderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A failed provider call together with the provider that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub error: ProviderError,
}

impl ProviderFailure {
    pub fn new(provider: ProviderId, error: ProviderError) -> Self {
        Self { provider, error }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// A successful context tagged with the provider it came from.
///
/// This is the element type handed to a combination strategy, so strategies
/// can name providers in their own errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedContext<C> {
    pub provider: ProviderId,
    pub context: C,
}

impl<C> SourcedContext<C> {
    pub fn new(provider: ProviderId, context: C) -> Self {
        Self { provider, context }
    }
}

/// Result slot for one provider in one fan-out
#[derive(Debug, Clone, PartialEq)]
pub enum ContextOutcome<C> {
    Success(SourcedContext<C>),
    Failure(ProviderFailure),
}

impl<C> ContextOutcome<C> {
    pub fn success(provider: ProviderId, context: C) -> Self {
        Self::Success(SourcedContext::new(provider, context))
    }

    pub fn failure(provider: ProviderId, error: ProviderError) -> Self {
        Self::Failure(ProviderFailure::new(provider, error))
    }

    /// Split outcomes into successes and failures, preserving input order in both
    pub fn partition(outcomes: Vec<Self>) -> (Vec<SourcedContext<C>>, Vec<ProviderFailure>) {
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                ContextOutcome::Success(ctx) => successes.push(ctx),
                ContextOutcome::Failure(failure) => failures.push(failure),
            }
        }
        (successes, failures)
    }
}
