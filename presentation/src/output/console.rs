//! Console output formatter for gather results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use orchestra_application::GatherReport;
use orchestra_domain::{ConfigIssue, ProviderFailure};
use serde_json::Value;

/// Formats gather results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the merged context with a summary and diagnostics
    pub fn format(query: &str, report: &GatherReport<Value>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Context Orchestra"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), query));

        let providers = format!("{}/{} succeeded", report.succeeded, report.total);
        let providers = if report.is_degraded() {
            providers.yellow()
        } else {
            providers.green()
        };
        output.push_str(&format!("{} {}\n", "Providers:".cyan().bold(), providers));

        if report.is_degraded() {
            output.push_str(&Self::section_header("Skipped Providers"));
            output.push_str(&Self::failure_lines(&report.diagnostics));
        }

        output.push_str(&Self::section_header("Merged Context"));
        output.push('\n');
        output.push_str(&Self::render_value(&report.context));
        output.push('\n');

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &GatherReport<Value>) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the merged context only (pipe-friendly)
    pub fn format_context_only(report: &GatherReport<Value>) -> String {
        Self::render_value(&report.context)
    }

    /// Format the failures collected while propagating an update
    pub fn format_update_result(updated: usize, failures: &[ProviderFailure]) -> String {
        if failures.is_empty() {
            return format!(
                "{} Update propagated to {} provider(s)\n",
                "v".green(),
                updated
            );
        }

        let mut output = format!(
            "{} Update failed for {} of {} provider(s):\n",
            "!".yellow().bold(),
            failures.len(),
            updated
        );
        output.push_str(&Self::failure_lines(failures));
        output
    }

    /// Format configuration issues, errors first
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        let mut sorted: Vec<_> = issues.iter().collect();
        sorted.sort_by_key(|issue| !issue.is_error());

        sorted
            .into_iter()
            .map(|issue| {
                let label = if issue.is_error() {
                    "error:".red().bold()
                } else {
                    "warning:".yellow().bold()
                };
                format!("{} {}\n", label, issue.message)
            })
            .collect()
    }

    /// Strings are printed raw, anything else as pretty JSON
    fn render_value(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    fn failure_lines(failures: &[ProviderFailure]) -> String {
        failures
            .iter()
            .map(|failure| {
                format!(
                    "  {} {}: {}\n",
                    "x".red(),
                    failure.provider.to_string().bold(),
                    failure.error
                )
            })
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, query: &str, report: &GatherReport<Value>) -> String {
        Self::format(query, report)
    }

    fn format_json(&self, report: &GatherReport<Value>) -> String {
        Self::format_json(report)
    }

    fn format_context_only(&self, report: &GatherReport<Value>) -> String {
        Self::format_context_only(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestra_domain::{ConfigIssueCode, ProviderError, ProviderId};
    use serde_json::json;

    fn report(context: Value, diagnostics: Vec<ProviderFailure>) -> GatherReport<Value> {
        GatherReport {
            context,
            succeeded: 2 - diagnostics.len(),
            total: 2,
            diagnostics,
        }
    }

    fn failure() -> ProviderFailure {
        ProviderFailure::new(
            ProviderId::new(1, "api"),
            ProviderError::failed("connection refused"),
        )
    }

    #[test]
    fn test_context_only_renders_strings_raw() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_context_only(&report(json!("a\nb"), vec![]));
        assert_eq!(text, "a\nb");

        let object = ConsoleFormatter::format_context_only(&report(json!({"k": 1}), vec![]));
        assert_eq!(object, "{\n  \"k\": 1\n}");
    }

    #[test]
    fn test_format_lists_skipped_providers() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format("weather", &report(json!("sunny"), vec![failure()]));
        assert!(text.contains("Query: weather"));
        assert!(text.contains("1/2 succeeded"));
        assert!(text.contains("Skipped Providers"));
        assert!(text.contains("api#1: Provider failed: connection refused"));
        assert!(text.contains("sunny"));
    }

    #[test]
    fn test_format_json() {
        let text = ConsoleFormatter::format_json(&report(json!({"k": 1}), vec![failure()]));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["context"], json!({"k": 1}));
        assert_eq!(parsed["succeeded"], json!(1));
        assert_eq!(parsed["diagnostics"][0]["provider"]["name"], json!("api"));
    }

    #[test]
    fn test_update_result() {
        colored::control::set_override(false);
        assert!(ConsoleFormatter::format_update_result(2, &[]).contains("propagated to 2"));

        let text = ConsoleFormatter::format_update_result(2, &[failure()]);
        assert!(text.contains("failed for 1 of 2"));
        assert!(text.contains("api#1"));
    }

    #[test]
    fn test_config_issues_errors_first() {
        colored::control::set_override(false);
        let issues = vec![
            ConfigIssue::warning(ConfigIssueCode::EmptyProviderName { index: 0 }, "blank"),
            ConfigIssue::error(
                ConfigIssueCode::UnreachableThreshold {
                    required: 3,
                    providers: 2,
                },
                "unreachable",
            ),
        ];
        let text = ConsoleFormatter::format_config_issues(&issues);
        assert_eq!(text, "error: unreachable\nwarning: blank\n");
    }
}
