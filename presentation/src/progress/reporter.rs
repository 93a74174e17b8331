//! Progress reporting for provider fan-outs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use orchestra_application::{FanoutOperation, ProgressNotifier};
use orchestra_domain::ProviderId;
use std::sync::Mutex;

/// Reports progress with an indicatif bar per fan-out
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
        }
    }

    fn fanout_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn display_name(operation: FanoutOperation) -> &'static str {
        match operation {
            FanoutOperation::Fetch => "Gathering context",
            FanoutOperation::Update => "Propagating update",
        }
    }

    fn status(provider: &ProviderId, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), provider)
        } else {
            format!("{} {}", "x".red(), provider)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_fanout_start(&self, operation: FanoutOperation, total_providers: usize) {
        let pb = self.multi.add(ProgressBar::new(total_providers as u64));
        pb.set_style(Self::fanout_style());
        pb.set_prefix(Self::display_name(operation));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_provider_complete(&self, _operation: FanoutOperation, provider: &ProviderId, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::status(provider, success));
            pb.inc(1);
        }
    }

    fn on_fanout_complete(&self, operation: FanoutOperation) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{} done", operation.as_str().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_fanout_start(&self, operation: FanoutOperation, total_providers: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            ProgressReporter::display_name(operation).bold(),
            total_providers
        );
    }

    fn on_provider_complete(&self, _operation: FanoutOperation, provider: &ProviderId, success: bool) {
        if success {
            eprintln!("  {}", ProgressReporter::status(provider, true));
        } else {
            eprintln!("  {} (failed)", ProgressReporter::status(provider, false));
        }
    }

    fn on_fanout_complete(&self, _operation: FanoutOperation) {
        eprintln!();
    }
}
