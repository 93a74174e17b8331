//! Simulated API endpoint provider

use super::simulate_latency;
use async_trait::async_trait;
use orchestra_application::ContextProvider;
use orchestra_domain::ProviderError;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// Serves canned responses from a table of named endpoints.
///
/// The query names the endpoint. Known endpoints yield
/// `{"status": "success", "data": .., "endpoint": ..}`, unknown ones an
/// `{"error": ..}` object (which is still a successful fetch). Updates of the
/// form `{"endpoint": .., "data": ..}` replace an endpoint's payload.
pub struct ApiProvider {
    name: String,
    endpoints: RwLock<HashMap<String, Value>>,
    latency: Option<Duration>,
}

impl ApiProvider {
    pub fn new(name: impl Into<String>, endpoints: HashMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            endpoints: RwLock::new(endpoints),
            latency: None,
        }
    }

    pub fn with_sample_endpoints(name: impl Into<String>) -> Self {
        let endpoints = HashMap::from([
            (
                "weather".to_string(),
                json!({"temperature": 25, "condition": "sunny", "location": "Example City"}),
            ),
            (
                "news".to_string(),
                json!([
                    {"title": "Example News 1", "summary": "This is an example news item."},
                    {"title": "Example News 2", "summary": "This is another example news item."},
                ]),
            ),
            (
                "user".to_string(),
                json!({"name": "Example User", "email": "user@example.com"}),
            ),
        ]);
        Self::new(name, endpoints)
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    /// Add endpoints, replacing existing ones
    pub fn extend(mut self, endpoints: HashMap<String, Value>) -> Self {
        self.endpoints.get_mut().extend(endpoints);
        self
    }
}

#[async_trait]
impl ContextProvider<String, Value, Value> for ApiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &String) -> Result<Value, ProviderError> {
        let endpoint = query.trim();
        if endpoint.is_empty() {
            return Err(ProviderError::invalid_input("endpoint name is empty"));
        }

        simulate_latency(self.latency).await;

        let endpoints = self.endpoints.read().await;
        Ok(match endpoints.get(endpoint) {
            Some(data) => json!({
                "status": "success",
                "data": data,
                "endpoint": endpoint,
            }),
            None => json!({"error": format!("Endpoint {} not found", endpoint)}),
        })
    }

    fn supports_update(&self) -> bool {
        true
    }

    async fn update(&self, response: &Value) -> Result<(), ProviderError> {
        let endpoint = response
            .get("endpoint")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::invalid_input("update requires a string `endpoint`"))?;
        let data = response
            .get("data")
            .cloned()
            .ok_or_else(|| ProviderError::invalid_input("update requires `data`"))?;

        simulate_latency(self.latency).await;

        self.endpoints
            .write()
            .await
            .insert(endpoint.to_string(), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_endpoint() {
        let provider = ApiProvider::with_sample_endpoints("api");
        let context = provider.fetch(&"weather".to_string()).await.unwrap();
        assert_eq!(context["status"], json!("success"));
        assert_eq!(context["endpoint"], json!("weather"));
        assert_eq!(
            context["data"],
            json!({"temperature": 25, "condition": "sunny", "location": "Example City"})
        );
    }

    #[tokio::test]
    async fn test_sample_news_and_user_payloads() {
        let provider = ApiProvider::with_sample_endpoints("api");

        let news = provider.fetch(&"news".to_string()).await.unwrap();
        assert_eq!(news["data"].as_array().map(Vec::len), Some(2));
        assert_eq!(news["data"][0]["title"], json!("Example News 1"));

        let user = provider.fetch(&"user".to_string()).await.unwrap();
        assert_eq!(
            user["data"],
            json!({"name": "Example User", "email": "user@example.com"})
        );
    }

    #[tokio::test]
    async fn test_fetch_unknown_endpoint() {
        let provider = ApiProvider::with_sample_endpoints("api");
        let context = provider.fetch(&"stocks".to_string()).await.unwrap();
        assert_eq!(context, json!({"error": "Endpoint stocks not found"}));
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid() {
        let provider = ApiProvider::with_sample_endpoints("api");
        let err = provider.fetch(&"  ".to_string()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_endpoint() {
        let provider = ApiProvider::new("api", HashMap::new());
        provider
            .update(&json!({"endpoint": "stocks", "data": {"ACME": 10}}))
            .await
            .unwrap();

        let context = provider.fetch(&"stocks".to_string()).await.unwrap();
        assert_eq!(context["data"], json!({"ACME": 10}));
    }

    #[tokio::test]
    async fn test_update_requires_endpoint() {
        let provider = ApiProvider::new("api", HashMap::new());
        let err = provider.update(&json!({"data": 1})).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidInput(_)));
    }
}
