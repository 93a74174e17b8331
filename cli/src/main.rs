//! CLI entrypoint for Context Orchestra
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use orchestra_application::{ContextOrchestrator, NoProgress, ProgressNotifier};
use orchestra_domain::{CollisionPolicy, FailurePolicy, OutputFormat};
use orchestra_infrastructure::{ConfigLoader, FileConfig, ProviderFactory, StrategyKind};
use orchestra_presentation::{Cli, ConsoleFormatter, OutputConfig, ProgressReporter, SimpleProgress};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting Context Orchestra");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&cli, &mut config)?;

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_config_issues(&issues));
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Configuration is invalid");
    }

    let query = match &cli.query {
        Some(q) => q.clone(),
        None => bail!("A query is required. Use --show-config to inspect configuration sources."),
    };

    let output = OutputConfig::default()
        .with_format(config.output.format)
        .with_format(cli.output.map(OutputFormat::from))
        .with_color(config.output.color)
        .with_progress(config.output.progress && !cli.quiet);
    output.apply_color_override();

    // === Dependency Injection ===
    let (orchestrator_config, _) = config.orchestrator.to_orchestrator_config();
    let (strategy, _) = config.strategy.to_strategy();
    let providers = ProviderFactory::from_config(&config);

    // Ctrl-C cancels every outstanding provider call
    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling provider calls");
            ctrl_c.cancel();
        }
    });

    let orchestrator = ContextOrchestrator::<String, Value, Value, Value>::builder(strategy)
        .providers(providers)
        .config(orchestrator_config)
        .build()?;

    info!(
        "Gathering from {} provider(s) with {} strategy, policy: {}",
        orchestrator.registry().len(),
        orchestrator.strategy_name(),
        orchestrator.failure_policy()
    );

    let progress: Box<dyn ProgressNotifier> = if !output.shows_progress() {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        // Log lines would tear an animated bar
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let report = orchestrator
        .gather_with_cancellation(query.clone(), progress.as_ref(), &cancellation)
        .await?;

    let rendered = match output.format {
        OutputFormat::Text => ConsoleFormatter::format(&query, &report),
        OutputFormat::Context => ConsoleFormatter::format_context_only(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", rendered);

    // === Update propagation ===
    if let Some(update) = &cli.update {
        let response: Value =
            serde_json::from_str(update).context("--update must be valid JSON")?;
        let updatable = orchestrator.registry().updatable().count();

        let failures = orchestrator
            .propagate_update_with_cancellation(response, progress.as_ref(), &cancellation)
            .await;
        eprint!(
            "{}",
            ConsoleFormatter::format_update_result(updatable, &failures)
        );
    }

    Ok(())
}

/// Command-line values take precedence over every configuration source.
///
/// Unlike file values, which fall back with a warning, an invalid
/// command-line value is an error.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) -> Result<()> {
    if let Some(policy) = &cli.policy {
        policy.parse::<FailurePolicy>().map_err(anyhow::Error::msg)?;
        config.orchestrator.policy = policy.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.orchestrator.timeout_ms = Some(timeout_ms);
    }
    if let Some(strategy) = &cli.strategy {
        strategy.parse::<StrategyKind>().map_err(anyhow::Error::msg)?;
        config.strategy.kind = strategy.clone();
    }
    if let Some(collision) = &cli.collision {
        collision
            .parse::<CollisionPolicy>()
            .map_err(anyhow::Error::msg)?;
        config.strategy.collision = collision.clone();
    }
    if let Some(separator) = &cli.separator {
        config.strategy.separator = Some(unescape(separator));
    }
    Ok(())
}

/// Expand `\n` and `\t` typed on the command line
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}
