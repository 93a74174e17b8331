//! In-memory key/text store provider

use super::simulate_latency;
use async_trait::async_trait;
use orchestra_application::ContextProvider;
use orchestra_domain::{ContextText, ProviderError};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Looks the query up as a key in an in-memory store.
///
/// Updates merge a JSON object of key/text pairs into the store, so context
/// written back after one gather is visible to the next.
pub struct MemoryProvider {
    name: String,
    store: RwLock<HashMap<String, String>>,
    latency: Option<Duration>,
}

impl MemoryProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_entries(name, HashMap::new())
    }

    pub fn with_entries(name: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            store: RwLock::new(entries),
            latency: None,
        }
    }

    /// Store seeded with a few sample entries
    pub fn with_sample_entries(name: impl Into<String>) -> Self {
        let entries = [
            ("default", "This is default memory context."),
            ("example", "This is an example memory entry."),
            ("test", "This is a test memory entry."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self::with_entries(name, entries)
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    /// Add entries, replacing existing keys
    pub fn extend(mut self, entries: HashMap<String, String>) -> Self {
        self.store.get_mut().extend(entries);
        self
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl ContextProvider<String, Value, Value> for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &String) -> Result<Value, ProviderError> {
        simulate_latency(self.latency).await;

        let store = self.store.read().await;
        let text = match store.get(query.trim()) {
            Some(entry) => entry.clone(),
            None => format!("No memory found for query: {}", query),
        };
        Ok(Value::String(text))
    }

    fn supports_update(&self) -> bool {
        true
    }

    async fn update(&self, response: &Value) -> Result<(), ProviderError> {
        let entries = response.as_object().ok_or_else(|| {
            ProviderError::invalid_input("memory update must be a JSON object of key/text pairs")
        })?;

        simulate_latency(self.latency).await;

        let mut store = self.store.write().await;
        for (key, value) in entries {
            store.insert(key.clone(), value.as_text().into_owned());
        }
        debug!("Memory provider {} now holds {} entries", self.name, store.len());
        Ok(())
    }
}
