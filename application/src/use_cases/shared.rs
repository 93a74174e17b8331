//! Shared fan-out machinery for use cases.
//!
//! Both gathering and update propagation issue one call per provider
//! concurrently and wait for all of them to settle. This module owns that
//! structured join: every call runs as its own task on a [`JoinSet`], is
//! bounded by the optional per-call timeout, has its panics caught, and
//! writes its result into the slot of its provider.

use crate::ports::progress::{FanoutOperation, ProgressNotifier};
use futures::FutureExt;
use orchestra_domain::{ProviderError, ProviderId};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Settled results of one fan-out, in the order the calls were given.
pub(crate) struct Fanout<T> {
    pub outcomes: Vec<(ProviderId, Result<T, ProviderError>)>,
    /// The cancellation token fired before every call settled
    pub cancelled: bool,
}

/// Limits applied to every call of a fan-out.
#[derive(Clone, Copy)]
pub(crate) struct CallLimits<'a> {
    pub timeout: Option<Duration>,
    pub cancellation_token: Option<&'a CancellationToken>,
}

/// Run every call concurrently and wait for all of them to settle.
///
/// Completion order does not matter: each result lands in the slot of the
/// call that produced it. On cancellation, outstanding tasks are aborted and
/// their slots are filled with [`ProviderError::Cancelled`].
pub(crate) async fn fan_out<T, Fut>(
    calls: Vec<(ProviderId, Fut)>,
    operation: FanoutOperation,
    limits: CallLimits<'_>,
    progress: &dyn ProgressNotifier,
) -> Fanout<T>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ProviderError>> + Send + 'static,
{
    progress.on_fanout_start(operation, calls.len());

    let mut slots: Vec<Option<Result<T, ProviderError>>> = calls.iter().map(|_| None).collect();
    let mut providers = Vec::with_capacity(calls.len());
    let mut join_set = JoinSet::new();

    for (slot, (provider, call)) in calls.into_iter().enumerate() {
        debug!("Dispatching {} to provider {}", operation, provider);
        providers.push(provider);
        let timeout = limits.timeout;
        join_set.spawn(async move { (slot, isolate(call, timeout).await) });
    }

    let mut cancelled = false;
    loop {
        let joined = match next_settled(&mut join_set, limits.cancellation_token).await {
            Some(Ok(Some(joined))) => joined,
            Some(Ok(None)) => break,
            Some(Err(e)) => {
                // Only aborted tasks end up here; panics are caught inside the task
                warn!("Provider task join error: {}", e);
                continue;
            }
            None => {
                warn!("{} fan-out cancelled, aborting outstanding calls", operation);
                join_set.abort_all();
                cancelled = true;
                break;
            }
        };

        let (slot, result) = joined;
        let provider = &providers[slot];
        match &result {
            Ok(_) => debug!("Provider {} completed {}", provider, operation),
            Err(e) => warn!("Provider {} failed {}: {}", provider, operation, e),
        }
        progress.on_provider_complete(operation, provider, result.is_ok());
        slots[slot] = Some(result);
    }

    progress.on_fanout_complete(operation);

    let outcomes = providers
        .into_iter()
        .zip(slots)
        .map(|(provider, slot)| (provider, slot.unwrap_or(Err(ProviderError::Cancelled))))
        .collect();

    Fanout {
        outcomes,
        cancelled,
    }
}

/// Wait for the next task, or for cancellation.
///
/// Returns `None` when the token fired, `Some(Ok(None))` when the set is drained.
async fn next_settled<T: 'static>(
    join_set: &mut JoinSet<T>,
    token: Option<&CancellationToken>,
) -> Option<Result<Option<T>, JoinError>> {
    let next = match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => return None,
            next = join_set.join_next() => next,
        },
        None => join_set.join_next().await,
    };
    Some(next.transpose())
}

/// Run a single call, converting timeouts and panics into provider errors
async fn isolate<T, Fut>(call: Fut, timeout: Option<Duration>) -> Result<T, ProviderError>
where
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let guarded = AssertUnwindSafe(call).catch_unwind();
    let settled = match timeout {
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(settled) => settled,
            // The call future is dropped here; whatever it would have produced is discarded
            Err(_) => return Err(ProviderError::Timeout(limit)),
        },
        None => guarded.await,
    };
    settled.unwrap_or_else(|payload| Err(ProviderError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
