//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! String-typed enum fields are parsed leniently: an unknown value falls back
//! to its default and is reported as a [`ConfigIssue`].

mod orchestrator;
mod output;
mod providers;
mod strategy;

pub use orchestrator::FileOrchestratorConfig;
pub use output::FileOutputConfig;
pub use providers::FileProviderConfig;
pub use strategy::FileStrategyConfig;

use orchestra_domain::{ConfigIssue, ConfigIssueCode, FailurePolicy};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Failure policy and timeout
    pub orchestrator: FileOrchestratorConfig,
    /// Combination strategy
    pub strategy: FileStrategyConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Providers in registration order
    pub providers: Vec<FileProviderConfig>,
}

impl FileConfig {
    /// Providers the configuration will register, in order.
    ///
    /// Falls back to [`FileProviderConfig::default_set`] when no
    /// `[[providers]]` table is present.
    pub fn effective_providers(&self) -> Cow<'_, [FileProviderConfig]> {
        if self.providers.is_empty() {
            Cow::Owned(FileProviderConfig::default_set())
        } else {
            Cow::Borrowed(&self.providers)
        }
    }

    /// Number of providers the configuration will register
    pub fn provider_count(&self) -> usize {
        self.effective_providers().len()
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks enum strings, blank provider names and whether a success
    /// threshold can be met by the configured providers at all.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let (policy, policy_issues) = self.orchestrator.parse_policy();
        issues.extend(policy_issues);
        issues.extend(self.strategy.parse_kind().1);
        issues.extend(self.strategy.parse_collision().1);

        for (index, provider) in self.providers.iter().enumerate() {
            if provider.has_blank_name() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyProviderName { index },
                    format!(
                        "providers[{}]: empty name, using '{}'",
                        index,
                        provider.kind()
                    ),
                ));
            }
        }

        if let FailurePolicy::BestEffortWithThreshold(required) = policy {
            let providers = self.provider_count();
            if required > providers {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnreachableThreshold {
                        required,
                        providers,
                    },
                    format!(
                        "orchestrator.policy: threshold {} can never be met by {} provider(s)",
                        required, providers
                    ),
                ));
            }
        }

        issues
    }
}
