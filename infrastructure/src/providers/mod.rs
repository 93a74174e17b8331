//! Context provider adapters
//!
//! Concrete [`ContextProvider`](orchestra_application::ContextProvider)
//! implementations. All of them work on text queries and JSON contexts, so a
//! single registry can be assembled from configuration:
//!
//! | Provider | Source | Updatable |
//! |----------|--------|-----------|
//! | [`MemoryProvider`] | in-memory key/text store | yes |
//! | [`DocumentStoreProvider`] | keyword search over documents | no |
//! | [`FileProvider`] | files in a local directory | no |
//! | [`ApiProvider`] | simulated endpoint table | yes |

mod api;
mod documents;
mod files;
mod memory;
pub mod registry;

pub use api::ApiProvider;
pub use documents::{Document, DocumentStoreProvider};
pub use files::FileProvider;
pub use memory::MemoryProvider;
pub use registry::{JsonProvider, ProviderFactory};

use std::time::Duration;

/// Sleep for the configured artificial latency, if any
pub(crate) async fn simulate_latency(latency: Option<Duration>) {
    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
}

/// Lower-cased, whitespace-separated query terms
pub(crate) fn query_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}
