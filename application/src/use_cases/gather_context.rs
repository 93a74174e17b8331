//! Gather Context use case.
//!
//! Fans `fetch(query)` out to every registered provider, waits for all calls
//! to settle, applies the failure policy and combines the surviving contexts.
//!
//! 1. **Dispatch**: one isolated task per provider, optional per-call timeout
//! 2. **Settle**: every result is written to its provider's slot
//! 3. **Policy**: `FailFast`, `BestEffort` or `BestEffortWithThreshold`
//! 4. **Combine**: survivors in registration order go to the strategy
//! 5. **Format**: optional final transform of the merged value

use crate::ports::progress::{FanoutOperation, NoProgress, ProgressNotifier};
use crate::use_cases::orchestrator::ContextOrchestrator;
use crate::use_cases::shared::{CallLimits, fan_out};
use orchestra_domain::{CombineError, ContextOutcome, PolicyVerdict, ProviderFailure};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One or more providers failed under `FailFast`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} provider(s) failed: {}", .failures.len(), describe(.failures))]
pub struct AggregateError {
    pub failures: Vec<ProviderFailure>,
}

impl AggregateError {
    pub fn new(failures: Vec<ProviderFailure>) -> Self {
        Self { failures }
    }
}

fn describe(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while gathering context
#[derive(Error, Debug)]
pub enum GatherError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Insufficient context: {succeeded} provider(s) succeeded, {required} required")]
    InsufficientContext {
        required: usize,
        succeeded: usize,
        failures: Vec<ProviderFailure>,
    },

    #[error("Combination failed: {0}")]
    Combine(#[from] CombineError),

    #[error("Gather cancelled")]
    Cancelled,
}

impl GatherError {
    /// Provider failures carried by this error, if any
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            GatherError::Aggregate(aggregate) => &aggregate.failures,
            GatherError::InsufficientContext { failures, .. } => failures,
            GatherError::Combine(_) | GatherError::Cancelled => &[],
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatherError::Cancelled)
    }
}

/// Result of a successful gather, with the failures the policy tolerated
#[derive(Debug, Clone, Serialize)]
pub struct GatherReport<M> {
    /// Merged (and formatted, if configured) context
    pub context: M,
    /// Providers that failed but did not fail the gather
    pub diagnostics: Vec<ProviderFailure>,
    /// Number of providers whose context was combined
    pub succeeded: usize,
    /// Number of registered providers
    pub total: usize,
}

impl<M> GatherReport<M> {
    /// Returns `true` if some providers failed
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_context(self) -> M {
        self.context
    }
}

impl<Q, C, M, U> ContextOrchestrator<Q, C, M, U>
where
    Q: Send + Sync + 'static,
    C: Send + 'static,
    U: Send + Sync + 'static,
{
    /// Gather from every provider and return the merged context
    pub async fn gather_and_combine(&self, query: Q) -> Result<M, GatherError> {
        self.gather(query).await.map(GatherReport::into_context)
    }

    /// Gather from every provider, keeping tolerated failures as diagnostics
    pub async fn gather(&self, query: Q) -> Result<GatherReport<M>, GatherError> {
        self.gather_with_progress(query, &NoProgress).await
    }

    /// Gather with progress callbacks.
    ///
    /// Dropping the returned future aborts every outstanding provider call.
    pub async fn gather_with_progress(
        &self,
        query: Q,
        progress: &dyn ProgressNotifier,
    ) -> Result<GatherReport<M>, GatherError> {
        self.run_gather(query, progress, None).await
    }

    /// Gather until `token` fires.
    ///
    /// Cancelling the token aborts the outstanding provider calls of this
    /// gather only and yields [`GatherError::Cancelled`]. Later gathers on
    /// the same orchestrator are unaffected.
    pub async fn gather_with_cancellation(
        &self,
        query: Q,
        progress: &dyn ProgressNotifier,
        token: &CancellationToken,
    ) -> Result<GatherReport<M>, GatherError> {
        self.run_gather(query, progress, Some(token)).await
    }

    async fn run_gather(
        &self,
        query: Q,
        progress: &dyn ProgressNotifier,
        token: Option<&CancellationToken>,
    ) -> Result<GatherReport<M>, GatherError> {
        let total = self.registry.len();
        info!(
            "Gathering context from {} providers ({})",
            total, self.config.failure_policy
        );

        let query = Arc::new(query);
        let calls = self
            .registry
            .iter()
            .map(|entry| {
                let provider = Arc::clone(&entry.provider);
                let query = Arc::clone(&query);
                (entry.id.clone(), async move { provider.fetch(&query).await })
            })
            .collect();

        let limits = CallLimits {
            timeout: self.config.provider_timeout,
            cancellation_token: token,
        };
        let fanout = fan_out(calls, FanoutOperation::Fetch, limits, progress).await;
        if fanout.cancelled {
            return Err(GatherError::Cancelled);
        }

        let outcomes: Vec<ContextOutcome<C>> = fanout
            .outcomes
            .into_iter()
            .map(|(provider, result)| match result {
                Ok(context) => ContextOutcome::success(provider, context),
                Err(error) => ContextOutcome::failure(provider, error),
            })
            .collect();
        debug_assert_eq!(outcomes.len(), total);

        let (successes, failures) = ContextOutcome::partition(outcomes);
        let succeeded = successes.len();

        match self
            .config
            .failure_policy
            .evaluate(succeeded, failures.len())
        {
            PolicyVerdict::Combine => {}
            PolicyVerdict::Abort => {
                warn!("{} of {} providers failed, aborting", failures.len(), total);
                return Err(AggregateError::new(failures).into());
            }
            PolicyVerdict::Insufficient {
                required,
                succeeded,
            } => {
                warn!(
                    "Only {} of {} providers succeeded, {} required",
                    succeeded, total, required
                );
                return Err(GatherError::InsufficientContext {
                    required,
                    succeeded,
                    failures,
                });
            }
        }

        if successes.is_empty() {
            warn!("No provider returned context; combining empty input");
        }

        debug!(
            "Combining {} contexts with {} strategy",
            succeeded,
            self.strategy.name()
        );
        let merged = self.strategy.combine(successes)?;

        let context = match &self.formatter {
            Some(formatter) => formatter.format(merged),
            None => merged,
        };

        Ok(GatherReport {
            context,
            diagnostics: failures,
            succeeded,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        CountingStrategy, MockProvider, RecordingProgress, orchestrator_builder,
    };
    use orchestra_domain::{
        CollisionPolicy, DictionaryMergeStrategy, FailurePolicy, ProviderError, ProviderId,
    };
    use serde_json::{Value, json};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_merge_follows_registration_order_not_completion_order() {
        // First provider is the slowest, last is the fastest
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "alpha").with_delay(Duration::from_millis(300)))
            .provider(MockProvider::ok("b", "beta").with_delay(Duration::from_millis(200)))
            .provider(MockProvider::ok("c", "gamma").with_delay(Duration::from_millis(100)))
            .build()
            .unwrap();

        let merged = orchestrator
            .gather_and_combine("query".to_string())
            .await
            .unwrap();

        assert_eq!(merged, "alpha\nbeta\ngamma");
    }

    #[tokio::test]
    async fn test_every_provider_receives_the_same_query() {
        let first = MockProvider::ok("a", "x");
        let second = MockProvider::ok("b", "y");
        let seen_a = first.seen_queries();
        let seen_b = second.seen_queries();

        let orchestrator = orchestrator_builder()
            .provider(first)
            .provider(second)
            .build()
            .unwrap();
        orchestrator.gather("rust".to_string()).await.unwrap();

        assert_eq!(*seen_a.lock().unwrap(), vec!["rust".to_string()]);
        assert_eq!(*seen_b.lock().unwrap(), vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_fail_fast_reports_exactly_the_failed_providers() {
        let strategy = CountingStrategy::default();
        let calls = strategy.calls();

        let orchestrator: ContextOrchestrator<String, String, String, String> =
            ContextOrchestrator::builder(strategy)
                .provider(MockProvider::ok("a", "x"))
                .provider(MockProvider::err("b", ProviderError::failed("down")))
                .provider(MockProvider::ok("c", "z"))
                .provider(MockProvider::err("d", ProviderError::invalid_input("bad")))
                .failure_policy(FailurePolicy::FailFast)
                .build()
                .unwrap();

        let err = orchestrator
            .gather_and_combine("q".to_string())
            .await
            .unwrap_err();

        let failed: Vec<_> = err.failures().iter().map(|f| f.provider.clone()).collect();
        assert_eq!(failed, vec![ProviderId::new(1, "b"), ProviderId::new(3, "d")]);
        assert!(matches!(err, GatherError::Aggregate(_)));
        assert_eq!(
            err.to_string(),
            "2 provider(s) failed: b#1: Provider failed: down; d#3: Invalid input: bad"
        );
        // No combination happens when the policy aborts
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fast_waits_for_all_calls_to_settle() {
        let slow = MockProvider::ok("slow", "x").with_delay(Duration::from_secs(5));
        let completed = slow.completed();

        let orchestrator = orchestrator_builder()
            .provider(MockProvider::err("fast", ProviderError::failed("boom")))
            .provider(slow)
            .failure_policy(FailurePolicy::FailFast)
            .build()
            .unwrap();

        let result = orchestrator.gather("q".to_string()).await;

        assert!(result.is_err());
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_best_effort_combines_survivors_in_order() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "one"))
            .provider(MockProvider::err("b", ProviderError::failed("down")))
            .provider(MockProvider::ok("c", "three"))
            .provider(MockProvider::err("d", ProviderError::failed("down")))
            .provider(MockProvider::ok("e", "five"))
            .failure_policy(FailurePolicy::BestEffort)
            .build()
            .unwrap();

        let report = orchestrator.gather("q".to_string()).await.unwrap();

        assert_eq!(report.context, "one\nthree\nfive");
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.total, 5);
        assert!(report.is_degraded());
        let failed: Vec<_> = report
            .diagnostics
            .iter()
            .map(|f| f.provider.name.as_str())
            .collect();
        assert_eq!(failed, vec!["b", "d"]);
    }

    #[tokio::test]
    async fn test_best_effort_with_all_failures_returns_empty_merge() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::err("a", ProviderError::failed("down")))
            .provider(MockProvider::err("b", ProviderError::failed("down")))
            .build()
            .unwrap();

        let report = orchestrator.gather("q".to_string()).await.unwrap();

        assert_eq!(report.context, "");
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[tokio::test]
    async fn test_threshold_with_one_success_is_insufficient() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "x"))
            .provider(MockProvider::err("b", ProviderError::failed("down")))
            .provider(MockProvider::err("c", ProviderError::failed("down")))
            .failure_policy(FailurePolicy::BestEffortWithThreshold(2))
            .build()
            .unwrap();

        let err = orchestrator.gather("q".to_string()).await.unwrap_err();

        match &err {
            GatherError::InsufficientContext {
                required,
                succeeded,
                failures,
            } => {
                assert_eq!(*required, 2);
                assert_eq!(*succeeded, 1);
                assert_eq!(failures.len(), 2);
            }
            other => panic!("expected InsufficientContext, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_threshold_with_two_successes_succeeds() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "x"))
            .provider(MockProvider::err("b", ProviderError::failed("down")))
            .provider(MockProvider::ok("c", "z"))
            .failure_policy(FailurePolicy::BestEffortWithThreshold(2))
            .build()
            .unwrap();

        let merged = orchestrator
            .gather_and_combine("q".to_string())
            .await
            .unwrap();

        assert_eq!(merged, "x\nz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_recorded_and_late_result_discarded() {
        let slow = MockProvider::ok("slow", "late").with_delay(Duration::from_secs(10));
        let completed = slow.completed();

        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("fast", "early"))
            .provider(slow)
            .provider_timeout(Duration::from_secs(1))
            .build()
            .unwrap();

        let report = orchestrator.gather("q".to_string()).await.unwrap();

        assert_eq!(report.context, "early");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].provider, ProviderId::new(1, "slow"));
        assert_eq!(
            report.diagnostics[0].error,
            ProviderError::Timeout(Duration::from_secs(1))
        );

        // Long after the deadline the abandoned call never completes
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(report.context, "early");
    }

    #[tokio::test]
    async fn test_panicking_provider_does_not_affect_siblings() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::panicking("broken"))
            .provider(MockProvider::ok("healthy", "fine"))
            .build()
            .unwrap();

        let report = orchestrator.gather("q".to_string()).await.unwrap();

        assert_eq!(report.context, "fine");
        assert!(matches!(
            report.diagnostics[0].error,
            ProviderError::Panicked(_)
        ));
    }

    #[tokio::test]
    async fn test_formatter_consumes_merged_context() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "x"))
            .provider(MockProvider::ok("b", "y"))
            .formatter(|merged: String| format!("<context>\n{}\n</context>", merged))
            .build()
            .unwrap();

        let merged = orchestrator
            .gather_and_combine("q".to_string())
            .await
            .unwrap();

        assert_eq!(merged, "<context>\nx\ny\n</context>");
    }

    #[tokio::test]
    async fn test_merge_conflict_surfaces_as_combine_error() {
        let orchestrator: ContextOrchestrator<String, Value, Value, String> =
            ContextOrchestrator::builder(DictionaryMergeStrategy::new(
                CollisionPolicy::FailOnConflict,
            ))
            .provider(MockProvider::ok("a", json!({"x": 1})))
            .provider(MockProvider::ok("b", json!({"x": 2})))
            .build()
            .unwrap();

        let err = orchestrator.gather("q".to_string()).await.unwrap_err();

        match err {
            GatherError::Combine(combine) => assert_eq!(combine.conflicting_key(), Some("x")),
            other => panic!("expected Combine error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_last_wins_dictionary_gather() {
        let orchestrator: ContextOrchestrator<String, Value, Value, String> =
            ContextOrchestrator::builder(DictionaryMergeStrategy::default())
                .provider(MockProvider::ok("a", json!({"x": 1, "y": true})))
                .provider(MockProvider::ok("b", json!({"x": 2})))
                .build()
                .unwrap();

        let merged = orchestrator
            .gather_and_combine("q".to_string())
            .await
            .unwrap();

        assert_eq!(merged, json!({"x": 2, "y": true}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_token_aborts_gather() {
        let token = CancellationToken::new();
        let slow = MockProvider::ok("slow", "x").with_delay(Duration::from_secs(60));
        let completed = slow.completed();

        let orchestrator = orchestrator_builder().provider(slow).build().unwrap();

        let trigger = token.clone();
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let err = orchestrator
            .gather_with_cancellation("q".to_string(), &NoProgress, &token)
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert!(err.is_cancelled());
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_gather_does_not_poison_the_orchestrator() {
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "x").with_delay(Duration::from_millis(100)))
            .build()
            .unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let first = orchestrator
            .gather_with_cancellation("q".to_string(), &NoProgress, &token)
            .await;
        assert!(first.unwrap_err().is_cancelled());

        let second = orchestrator.gather("q".to_string()).await.unwrap();
        assert_eq!(second.context, "x");

        let fresh = CancellationToken::new();
        let third = orchestrator
            .gather_with_cancellation("q".to_string(), &NoProgress, &fresh)
            .await
            .unwrap();
        assert_eq!(third.context, "x");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_gather_future_aborts_provider_calls() {
        let slow = MockProvider::ok("slow", "x").with_delay(Duration::from_secs(60));
        let completed = slow.completed();

        let orchestrator = orchestrator_builder()
            .provider(slow)
            .provider(MockProvider::ok("fast", "y"))
            .build()
            .unwrap();

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            orchestrator.gather("q".to_string()),
        )
        .await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_progress_sees_every_provider() {
        let progress = RecordingProgress::default();
        let orchestrator = orchestrator_builder()
            .provider(MockProvider::ok("a", "x"))
            .provider(MockProvider::err("b", ProviderError::failed("down")))
            .build()
            .unwrap();

        orchestrator
            .gather_with_progress("q".to_string(), &progress)
            .await
            .unwrap();

        let events = progress.events();
        assert_eq!(events.first().map(String::as_str), Some("start fetch 2"));
        assert!(events.contains(&"done fetch a#0 true".to_string()));
        assert!(events.contains(&"done fetch b#1 false".to_string()));
        assert_eq!(events.last().map(String::as_str), Some("complete fetch"));
    }

    #[tokio::test]
    async fn test_orchestrators_run_concurrently_without_interference() {
        let first = orchestrator_builder()
            .provider(MockProvider::ok("a", "one"))
            .build()
            .unwrap();
        let second = orchestrator_builder()
            .provider(MockProvider::ok("b", "two"))
            .build()
            .unwrap();

        let (left, right) = tokio::join!(
            first.gather_and_combine("q".to_string()),
            second.gather_and_combine("q".to_string())
        );

        assert_eq!(left.unwrap(), "one");
        assert_eq!(right.unwrap(), "two");
    }

    #[test]
    fn test_aggregate_error_display() {
        let err = AggregateError::new(vec![ProviderFailure::new(
            ProviderId::new(0, "api"),
            ProviderError::Timeout(Duration::from_millis(500)),
        )]);
        assert_eq!(err.to_string(), "1 provider(s) failed: api#0: Timed out after 500ms");
    }
}
