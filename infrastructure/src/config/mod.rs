//! Configuration file loading for context-orchestra
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `ORCHESTRA_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./orchestra.toml` or `./.orchestra.toml`
//! 4. Global: `$XDG_CONFIG_HOME/context-orchestra/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileOrchestratorConfig, FileOutputConfig, FileProviderConfig,
    FileStrategyConfig,
};
pub use loader::ConfigLoader;
