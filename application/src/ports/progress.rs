//! Progress notification port
//!
//! Defines the interface for reporting progress while providers are called.

use orchestra_domain::ProviderId;

/// Which provider capability a fan-out is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanoutOperation {
    Fetch,
    Update,
}

impl FanoutOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FanoutOperation::Fetch => "fetch",
            FanoutOperation::Update => "update",
        }
    }
}

impl std::fmt::Display for FanoutOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback for progress updates during a fan-out
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a fan-out starts
    fn on_fanout_start(&self, operation: FanoutOperation, total_providers: usize);

    /// Called when one provider call settles (success, failure or timeout)
    fn on_provider_complete(&self, operation: FanoutOperation, provider: &ProviderId, success: bool);

    /// Called when every provider call has settled
    fn on_fanout_complete(&self, operation: FanoutOperation);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_fanout_start(&self, _operation: FanoutOperation, _total_providers: usize) {}
    fn on_provider_complete(
        &self,
        _operation: FanoutOperation,
        _provider: &ProviderId,
        _success: bool,
    ) {
    }
    fn on_fanout_complete(&self, _operation: FanoutOperation) {}
}
