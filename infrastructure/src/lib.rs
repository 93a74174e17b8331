//! Infrastructure layer for context-orchestra
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: concrete context providers, runtime strategy
//! selection and configuration file loading.

pub mod config;
pub mod providers;
pub mod strategy;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileOrchestratorConfig, FileOutputConfig, FileProviderConfig,
    FileStrategyConfig,
};
pub use providers::{
    ApiProvider, Document, DocumentStoreProvider, FileProvider, JsonProvider, MemoryProvider,
    ProviderFactory,
};
pub use strategy::{ConfiguredStrategy, StrategyKind};
