//! Orchestrator parameters for fan-out behavior.
//!
//! [`OrchestratorConfig`] groups the construction-time parameters that
//! control how a [`ContextOrchestrator`](crate::use_cases::orchestrator::ContextOrchestrator)
//! treats its providers. Providers, strategy and formatter are wired
//! separately through the builder.

use orchestra_domain::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fan-out control parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Rule applied once every provider call has settled.
    pub failure_policy: FailurePolicy,
    /// Deadline for each individual provider call. `None` waits forever.
    pub provider_timeout: Option<Duration>,
}

impl OrchestratorConfig {
    // ==================== Builder Methods ====================

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Creates a config with the timeout given in milliseconds; zero disables it.
    pub fn with_provider_timeout_ms(self, millis: u64) -> Self {
        let timeout = (millis > 0).then(|| Duration::from_millis(millis));
        self.with_provider_timeout(timeout)
    }
}
