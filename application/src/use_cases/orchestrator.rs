//! Context orchestrator
//!
//! [`ContextOrchestrator`] owns an immutable [`ProviderRegistry`], one
//! combination strategy, an [`OrchestratorConfig`] and an optional
//! formatter. The two operations it drives live next to it:
//!
//! - gathering (`gather_context`): fan out `fetch`, apply the failure
//!   policy, combine the survivors in registration order
//! - update propagation (`propagate_update`): fan out `update` to the
//!   providers that support it, collecting failures as diagnostics

use crate::config::OrchestratorConfig;
use crate::ports::context_provider::{ContextProvider, SharedProvider};
use crate::ports::formatter::ContextFormatter;
use orchestra_domain::{CombinationStrategy, FailurePolicy, ProviderId};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while constructing an orchestrator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("At least one provider must be registered")]
    NoProviders,

    #[error("Failure policy requires {required} successes but only {providers} providers are registered")]
    UnreachableThreshold { required: usize, providers: usize },
}

/// A provider together with its identity in the registry
pub struct RegisteredProvider<Q, C, U = ()> {
    pub id: ProviderId,
    pub provider: SharedProvider<Q, C, U>,
}

impl<Q, C, U> Clone for RegisteredProvider<Q, C, U> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            provider: Arc::clone(&self.provider),
        }
    }
}

/// Ordered, non-empty, immutable set of providers.
///
/// Registration order is both the dispatch order and the order in which
/// successful contexts reach the strategy.
pub struct ProviderRegistry<Q, C, U = ()> {
    entries: Vec<RegisteredProvider<Q, C, U>>,
}

impl<Q, C, U> ProviderRegistry<Q, C, U> {
    pub fn new(providers: Vec<SharedProvider<Q, C, U>>) -> Result<Self, BuildError> {
        if providers.is_empty() {
            return Err(BuildError::NoProviders);
        }

        let entries = providers
            .into_iter()
            .enumerate()
            .map(|(index, provider)| RegisteredProvider {
                id: ProviderId::new(index, provider.name()),
                provider,
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredProvider<Q, C, U>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Providers that expose the update capability, in registration order
    pub fn updatable(&self) -> impl Iterator<Item = &RegisteredProvider<Q, C, U>> {
        self.entries.iter().filter(|e| e.provider.supports_update())
    }
}

/// Shared, type-erased strategy
pub type SharedStrategy<C, M> = Arc<dyn CombinationStrategy<C, Output = M>>;

/// Gathers context from every registered provider concurrently and merges it.
///
/// `Q` is the query, `C` the per-provider context, `M` the merged (and
/// optionally formatted) result and `U` the update response type.
///
/// All configuration is fixed at construction and an orchestrator holds no
/// mutable state, so it can be shared freely and several instances can run
/// side by side. Cancellation is scoped to a single operation: pass a token
/// to `gather_with_cancellation` or `propagate_update_with_cancellation`.
pub struct ContextOrchestrator<Q, C, M, U = ()> {
    pub(crate) registry: ProviderRegistry<Q, C, U>,
    pub(crate) strategy: SharedStrategy<C, M>,
    pub(crate) formatter: Option<Arc<dyn ContextFormatter<M>>>,
    pub(crate) config: OrchestratorConfig,
}

impl<Q, C, M, U> ContextOrchestrator<Q, C, M, U>
where
    Q: Send + Sync + 'static,
    C: Send + 'static,
    U: Send + Sync + 'static,
{
    /// Start building an orchestrator around a strategy
    pub fn builder<S>(strategy: S) -> ContextOrchestratorBuilder<Q, C, M, U>
    where
        S: CombinationStrategy<C, Output = M> + 'static,
    {
        Self::builder_with_shared(Arc::new(strategy))
    }

    /// Start building an orchestrator around an already shared strategy
    pub fn builder_with_shared(
        strategy: SharedStrategy<C, M>,
    ) -> ContextOrchestratorBuilder<Q, C, M, U> {
        ContextOrchestratorBuilder {
            providers: Vec::new(),
            strategy,
            formatter: None,
            config: OrchestratorConfig::default(),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry<Q, C, U> {
        &self.registry
    }

    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.registry.ids()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.config.failure_policy
    }

    pub fn provider_timeout(&self) -> Option<Duration> {
        self.config.provider_timeout
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }
}

/// Builder for [`ContextOrchestrator`]
pub struct ContextOrchestratorBuilder<Q, C, M, U = ()> {
    providers: Vec<SharedProvider<Q, C, U>>,
    strategy: SharedStrategy<C, M>,
    formatter: Option<Arc<dyn ContextFormatter<M>>>,
    config: OrchestratorConfig,
}

impl<Q, C, M, U> ContextOrchestratorBuilder<Q, C, M, U>
where
    Q: Send + Sync + 'static,
    C: Send + 'static,
    U: Send + Sync + 'static,
{
    /// Register a provider; registration order is combination order
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: ContextProvider<Q, C, U> + 'static,
    {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn providers(
        mut self,
        providers: impl IntoIterator<Item = SharedProvider<Q, C, U>>,
    ) -> Self {
        self.providers.extend(providers);
        self
    }

    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.config.provider_timeout = Some(timeout);
        self
    }

    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: ContextFormatter<M> + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn build(self) -> Result<ContextOrchestrator<Q, C, M, U>, BuildError> {
        let registry = ProviderRegistry::new(self.providers)?;

        let required = self.config.failure_policy.required_successes(registry.len());
        if required > registry.len() {
            return Err(BuildError::UnreachableThreshold {
                required,
                providers: registry.len(),
            });
        }

        Ok(ContextOrchestrator {
            registry,
            strategy: self.strategy,
            formatter: self.formatter,
            config: self.config,
        })
    }
}
