//! Application layer for context-orchestra
//!
//! This crate contains the orchestrator use case, its port definitions and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorConfig;
pub use ports::{
    context_provider::{ContextProvider, SharedProvider},
    formatter::ContextFormatter,
    progress::{FanoutOperation, NoProgress, ProgressNotifier},
};
pub use use_cases::gather_context::{AggregateError, GatherError, GatherReport};
pub use use_cases::orchestrator::{
    BuildError, ContextOrchestrator, ContextOrchestratorBuilder, ProviderRegistry,
    RegisteredProvider, SharedStrategy,
};
