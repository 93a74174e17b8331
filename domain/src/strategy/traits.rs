//! Strategy trait

use super::CombineError;
use crate::providers::SourcedContext;

/// Merges ordered contexts into one value.
///
/// `combine` must be total over any input length, including zero. It may
/// still fail on content it cannot merge (see [`CombineError`]).
pub trait CombinationStrategy<C>: Send + Sync {
    /// Merged value produced by this strategy
    type Output;

    /// Short name used in logs and output
    fn name(&self) -> &str;

    /// Combine contexts given in provider registration order
    fn combine(&self, contexts: Vec<SourcedContext<C>>) -> Result<Self::Output, CombineError>;
}
