//! CLI command definitions

use clap::{Parser, ValueEnum};
use orchestra_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for gather results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Merged context with per-provider diagnostics
    Text,
    /// Only the merged context
    Context,
    /// JSON report
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => DomainOutputFormat::Text,
            OutputFormat::Context => DomainOutputFormat::Context,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for context-orchestra
#[derive(Parser, Debug)]
#[command(name = "context-orchestra")]
#[command(author, version, about = "Gather context from many providers concurrently and merge it")]
#[command(long_about = r#"
Context Orchestra sends one query to every configured context provider in
parallel, applies a failure policy to the results and merges the survivors,
in provider order, with a combination strategy.

Failure policies:
  fail_fast       any provider failure fails the gather
  best_effort     failures are reported and skipped (default)
  threshold:N     like best_effort, but at least N providers must succeed

Configuration files are loaded from (in priority order):
1. ORCHESTRA_* environment variables
2. --config <path>     Explicit config file
3. ./orchestra.toml    Project-level config
4. ~/.config/context-orchestra/config.toml   Global config

Example:
  context-orchestra "rust async"
  context-orchestra --strategy dictionary --collision first_wins weather
  context-orchestra --update '{"rust": "Ownership first."}' rust
"#)]
pub struct Cli {
    /// The query sent to every provider
    pub query: Option<String>,

    /// JSON response to propagate to updatable providers after gathering
    #[arg(long, value_name = "JSON")]
    pub update: Option<String>,

    /// Failure policy: fail_fast, best_effort, threshold:N
    #[arg(short, long, value_name = "POLICY")]
    pub policy: Option<String>,

    /// Combination strategy: concat, dictionary, source_keyed
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Separator used by the concat strategy
    #[arg(long, value_name = "TEXT")]
    pub separator: Option<String>,

    /// Key collision policy for the dictionary strategy
    #[arg(long, value_name = "POLICY")]
    pub collision: Option<String>,

    /// Per-provider timeout in milliseconds (0 disables)
    #[arg(short, long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
