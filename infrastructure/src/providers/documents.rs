//! Read-only document store provider

use super::{query_terms, simulate_latency};
use async_trait::async_trait;
use orchestra_application::ContextProvider;
use orchestra_domain::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A searchable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub content: String,
}

impl Document {
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    fn matches(&self, terms: &[String]) -> bool {
        let content = self.content.to_lowercase();
        terms.iter().any(|term| content.contains(term.as_str()))
    }
}

/// Returns the documents that contain any of the query terms.
///
/// Matching is a case-insensitive substring test per term. When nothing
/// matches, a single placeholder document with id 0 is returned.
pub struct DocumentStoreProvider {
    name: String,
    documents: Vec<Document>,
    latency: Option<Duration>,
}

impl DocumentStoreProvider {
    pub fn new(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents,
            latency: None,
        }
    }

    /// Store seeded with [`Self::sample_documents`]
    pub fn with_sample_documents(name: impl Into<String>) -> Self {
        Self::new(name, Self::sample_documents())
    }

    pub fn sample_documents() -> Vec<Document> {
        vec![
            Document::new(1, "Document about Rust programming."),
            Document::new(2, "Document about async tasks in Rust."),
            Document::new(3, "Document about ownership and borrowing."),
            Document::new(4, "Document about context providers and LLMs."),
        ]
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    fn search(&self, query: &str) -> Vec<Document> {
        let terms = query_terms(query);
        let matches: Vec<_> = self
            .documents
            .iter()
            .filter(|doc| doc.matches(&terms))
            .cloned()
            .collect();

        if matches.is_empty() {
            vec![Document::new(
                0,
                format!("No documents found for query: {}", query),
            )]
        } else {
            matches
        }
    }
}

#[async_trait]
impl ContextProvider<String, Value, Value> for DocumentStoreProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &String) -> Result<Value, ProviderError> {
        simulate_latency(self.latency).await;
        serde_json::to_value(self.search(query)).map_err(|e| ProviderError::failed(e.to_string()))
    }
}
