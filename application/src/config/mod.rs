//! Application-level configuration.
//!
//! - [`OrchestratorConfig`]: failure policy and per-provider timeout

pub mod orchestrator_config;

pub use orchestrator_config::OrchestratorConfig;
