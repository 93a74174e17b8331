//! Test doubles shared by the use case tests.

use crate::ports::context_provider::ContextProvider;
use crate::ports::progress::{FanoutOperation, ProgressNotifier};
use crate::use_cases::orchestrator::{ContextOrchestrator, ContextOrchestratorBuilder};
use async_trait::async_trait;
use orchestra_domain::{
    CombinationStrategy, CombineError, ProviderError, ProviderId, SimpleConcatenationStrategy,
    SourcedContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Builder over text contexts with the default concatenation strategy
pub(crate) fn orchestrator_builder() -> ContextOrchestratorBuilder<String, String, String, String>
{
    ContextOrchestrator::builder(SimpleConcatenationStrategy::new())
}

enum Behavior<C> {
    Return(Result<C, ProviderError>),
    Panic,
}

/// Scripted provider
pub(crate) struct MockProvider<C> {
    name: String,
    behavior: Behavior<C>,
    delay: Option<Duration>,
    update: Option<Result<(), ProviderError>>,
    seen_queries: Arc<Mutex<Vec<String>>>,
    seen_updates: Arc<Mutex<Vec<String>>>,
    completed: Arc<AtomicUsize>,
}

impl<C> MockProvider<C> {
    fn with_behavior(name: &str, behavior: Behavior<C>) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            delay: None,
            update: None,
            seen_queries: Arc::new(Mutex::new(Vec::new())),
            seen_updates: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn ok(name: &str, context: impl Into<C>) -> Self {
        Self::with_behavior(name, Behavior::Return(Ok(context.into())))
    }

    pub fn err(name: &str, error: ProviderError) -> Self {
        Self::with_behavior(name, Behavior::Return(Err(error)))
    }

    pub fn panicking(name: &str) -> Self {
        Self::with_behavior(name, Behavior::Panic)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Enable the update capability with a scripted result
    pub fn with_update(mut self, result: Result<(), ProviderError>) -> Self {
        self.update = Some(result);
        self
    }

    pub fn seen_queries(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen_queries)
    }

    pub fn seen_updates(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen_updates)
    }

    /// Number of calls that ran to completion (not cut short by a timeout or abort)
    pub fn completed(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.completed)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<C> ContextProvider<String, C, String> for MockProvider<C>
where
    C: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &String) -> Result<C, ProviderError> {
        self.seen_queries.lock().unwrap().push(query.clone());
        self.pause().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Return(result) => result.clone(),
            Behavior::Panic => panic!("{} blew up", self.name),
        }
    }

    fn supports_update(&self) -> bool {
        self.update.is_some()
    }

    async fn update(&self, response: &String) -> Result<(), ProviderError> {
        self.seen_updates.lock().unwrap().push(response.clone());
        self.pause().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.update.clone().unwrap_or(Err(ProviderError::Unsupported))
    }
}

/// Concatenation strategy that counts how often it is invoked
#[derive(Default)]
pub(crate) struct CountingStrategy {
    inner: SimpleConcatenationStrategy,
    calls: Arc<AtomicUsize>,
}

impl CountingStrategy {
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl CombinationStrategy<String> for CountingStrategy {
    type Output = String;

    fn name(&self) -> &str {
        "counting"
    }

    fn combine(&self, contexts: Vec<SourcedContext<String>>) -> Result<String, CombineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.combine(contexts)
    }
}

/// Progress notifier that records every callback as a line of text
#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_fanout_start(&self, operation: FanoutOperation, total_providers: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {}", operation, total_providers));
    }

    fn on_provider_complete(&self, operation: FanoutOperation, provider: &ProviderId, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {} {}", operation, provider, success));
    }

    fn on_fanout_complete(&self, operation: FanoutOperation) {
        self.events
            .lock()
            .unwrap()
            .push(format!("complete {}", operation));
    }
}
