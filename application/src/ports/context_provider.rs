//! Context provider port
//!
//! Defines the interface every context source must implement to be driven
//! by the orchestrator.

use async_trait::async_trait;
use orchestra_domain::ProviderError;
use std::sync::Arc;

/// A source of context for a query.
///
/// `Q` is the query type, `C` the context a provider returns and `U` the
/// response type accepted by the optional update capability. Transport is
/// entirely the implementation's concern.
///
/// The orchestrator treats every provider as untrusted with respect to
/// timing and errors: calls are isolated from each other, bounded by an
/// optional timeout, and panics are caught at the call boundary.
#[async_trait]
pub trait ContextProvider<Q, C, U = ()>: Send + Sync {
    /// Display name of this provider (need not be unique)
    fn name(&self) -> &str;

    /// Retrieve context for a query
    async fn fetch(&self, query: &Q) -> Result<C, ProviderError>;

    /// Whether this provider accepts updates.
    ///
    /// Providers returning `false` are skipped by update propagation.
    fn supports_update(&self) -> bool {
        false
    }

    /// Feed a response back into the provider.
    ///
    /// Only called when [`supports_update`](Self::supports_update) returns `true`.
    async fn update(&self, _response: &U) -> Result<(), ProviderError>
    where
        U: Sync,
    {
        Err(ProviderError::Unsupported)
    }
}

/// Shared, type-erased provider as held by the registry
pub type SharedProvider<Q, C, U = ()> = Arc<dyn ContextProvider<Q, C, U>>;
