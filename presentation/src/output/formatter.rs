//! Output formatter trait

use orchestra_application::GatherReport;
use serde_json::Value;

/// Trait for formatting gather results
pub trait OutputFormatter {
    /// Format the merged context together with provider diagnostics
    fn format(&self, query: &str, report: &GatherReport<Value>) -> String;

    /// Format as JSON
    fn format_json(&self, report: &GatherReport<Value>) -> String;

    /// Format the merged context only
    fn format_context_only(&self, report: &GatherReport<Value>) -> String;
}
