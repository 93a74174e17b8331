//! Building providers from configuration

use super::{ApiProvider, DocumentStoreProvider, FileProvider, MemoryProvider};
use crate::config::{FileConfig, FileProviderConfig};
use orchestra_application::SharedProvider;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Provider type produced from configuration
pub type JsonProvider = SharedProvider<String, Value, Value>;

/// Creates providers in configuration order
pub struct ProviderFactory;

impl ProviderFactory {
    /// Providers for the `[[providers]]` tables, or the default set when
    /// none are configured
    pub fn from_config(config: &FileConfig) -> Vec<JsonProvider> {
        if config.providers.is_empty() {
            debug!("No providers configured, using the default set");
        }
        config
            .effective_providers()
            .iter()
            .map(Self::build)
            .collect()
    }

    pub fn build(config: &FileProviderConfig) -> JsonProvider {
        let name = config.name().to_string();
        let latency = config.latency();
        debug!("Building {} provider '{}'", config.kind(), name);

        let provider: JsonProvider = match config {
            FileProviderConfig::Memory {
                sample, entries, ..
            } => {
                let base = if *sample {
                    MemoryProvider::with_sample_entries(name)
                } else {
                    MemoryProvider::new(name)
                };
                Arc::new(base.with_latency(latency).extend(entries.clone()))
            }
            FileProviderConfig::Documents {
                sample, documents, ..
            } => {
                let mut all = if *sample {
                    DocumentStoreProvider::sample_documents()
                } else {
                    Vec::new()
                };
                all.extend(documents.iter().cloned());
                Arc::new(DocumentStoreProvider::new(name, all).with_latency(latency))
            }
            FileProviderConfig::Files {
                root,
                extensions,
                max_bytes,
                ..
            } => {
                let mut provider = FileProvider::new(name, root.clone())
                    .with_extensions(extensions.clone())
                    .with_latency(latency);
                if let Some(max_bytes) = max_bytes {
                    provider = provider.with_max_bytes(*max_bytes);
                }
                Arc::new(provider)
            }
            FileProviderConfig::Api {
                sample, endpoints, ..
            } => {
                let base = if *sample {
                    ApiProvider::with_sample_endpoints(name)
                } else {
                    ApiProvider::new(name, Default::default())
                };
                Arc::new(base.with_latency(latency).extend(endpoints.clone()))
            }
        };
        provider
    }
}
