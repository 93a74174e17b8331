//! Domain layer for context-orchestra
//!
//! This crate contains the pure types of context orchestration. It has no
//! dependencies on async runtimes, providers, or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Providers
//!
//! A provider is an external source of context. The domain only names
//! providers ([`ProviderId`]) and records the typed outcome of calling them
//! ([`ContextOutcome`], [`ProviderFailure`]).
//!
//! ## Failure Policy
//!
//! [`FailurePolicy`] decides whether a fan-out with failed providers is
//! aborted or degraded.
//!
//! ## Combination Strategies
//!
//! [`CombinationStrategy`] merges the surviving contexts, in registration
//! order, into one value.

pub mod config;
pub mod policy;
pub mod providers;
pub mod strategy;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use policy::{FailurePolicy, PolicyVerdict};
pub use providers::{ContextOutcome, ProviderError, ProviderFailure, ProviderId, SourcedContext};
pub use strategy::{
    CollisionPolicy, CombinationStrategy, CombineError, ContextText, DictionaryMergeStrategy,
    SimpleConcatenationStrategy, SourceKeyedStrategy,
};
