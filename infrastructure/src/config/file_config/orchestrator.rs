//! Orchestrator configuration from TOML (`[orchestrator]` section)
//!
//! ```toml
//! [orchestrator]
//! policy = "threshold:2"   # or "fail_fast", "best_effort"
//! timeout_ms = 1500         # 0 or absent disables the per-provider timeout
//! ```

use orchestra_application::OrchestratorConfig;
use orchestra_domain::{ConfigIssue, ConfigIssueCode, FailurePolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Failure policy: "fail_fast", "best_effort", "threshold:N"
    pub policy: String,
    /// Per-provider call timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        Self {
            policy: "best_effort".to_string(),
            timeout_ms: None,
        }
    }
}

impl FileOrchestratorConfig {
    /// Parse the policy string, falling back to best effort
    pub fn parse_policy(&self) -> (FailurePolicy, Vec<ConfigIssue>) {
        match self.policy.parse::<FailurePolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "orchestrator.policy".to_string(),
                        value: self.policy.clone(),
                    },
                    format!(
                        "orchestrator.policy: unknown value '{}', falling back to 'best_effort'",
                        self.policy
                    ),
                );
                (FailurePolicy::default(), vec![issue])
            }
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Convert to the application-layer configuration
    pub fn to_orchestrator_config(&self) -> (OrchestratorConfig, Vec<ConfigIssue>) {
        let (policy, issues) = self.parse_policy();
        let config = OrchestratorConfig::default()
            .with_failure_policy(policy)
            .with_provider_timeout(self.timeout());
        (config, issues)
    }
}
