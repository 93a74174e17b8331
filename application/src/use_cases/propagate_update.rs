//! Propagate Update use case.
//!
//! Feeds a response back to every provider that exposes the update
//! capability. Propagation is a side channel: individual failures are
//! returned as diagnostics and never fail the call.

use crate::ports::progress::{FanoutOperation, NoProgress, ProgressNotifier};
use crate::use_cases::orchestrator::ContextOrchestrator;
use crate::use_cases::shared::{CallLimits, fan_out};
use orchestra_domain::ProviderFailure;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

impl<Q, C, M, U> ContextOrchestrator<Q, C, M, U>
where
    Q: Send + Sync + 'static,
    C: Send + 'static,
    U: Send + Sync + 'static,
{
    /// Send `response` to every updatable provider, returning the failures
    pub async fn propagate_update(&self, response: U) -> Vec<ProviderFailure> {
        self.propagate_update_with_progress(response, &NoProgress)
            .await
    }

    /// Propagate with progress callbacks
    pub async fn propagate_update_with_progress(
        &self,
        response: U,
        progress: &dyn ProgressNotifier,
    ) -> Vec<ProviderFailure> {
        self.run_propagation(response, progress, None).await
    }

    /// Propagate until `token` fires; unsettled providers are reported as `Cancelled`
    pub async fn propagate_update_with_cancellation(
        &self,
        response: U,
        progress: &dyn ProgressNotifier,
        token: &CancellationToken,
    ) -> Vec<ProviderFailure> {
        self.run_propagation(response, progress, Some(token)).await
    }

    async fn run_propagation(
        &self,
        response: U,
        progress: &dyn ProgressNotifier,
        token: Option<&CancellationToken>,
    ) -> Vec<ProviderFailure> {
        let response = Arc::new(response);
        let calls: Vec<_> = self
            .registry
            .updatable()
            .map(|entry| {
                let provider = Arc::clone(&entry.provider);
                let response = Arc::clone(&response);
                (entry.id.clone(), async move {
                    provider.update(&response).await
                })
            })
            .collect();

        if calls.is_empty() {
            debug!("No providers support updates");
            return Vec::new();
        }

        info!("Propagating update to {} providers", calls.len());

        let limits = CallLimits {
            timeout: self.config.provider_timeout,
            cancellation_token: token,
        };
        let fanout = fan_out(calls, FanoutOperation::Update, limits, progress).await;
        if fanout.cancelled {
            warn!("Update propagation cancelled before every provider settled");
        }

        let failures: Vec<_> = fanout
            .outcomes
            .into_iter()
            .filter_map(|(provider, result)| {
                result
                    .err()
                    .map(|error| ProviderFailure::new(provider, error))
            })
            .collect();

        if !failures.is_empty() {
            warn!("{} provider update(s) failed", failures.len());
        }
        failures
    }
}
