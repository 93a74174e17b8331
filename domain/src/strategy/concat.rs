//! Text concatenation strategy

use super::{CombinationStrategy, CombineError, ContextText};
use crate::providers::SourcedContext;

/// Joins text contexts with a separator, in input order.
///
/// An empty input yields an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleConcatenationStrategy {
    separator: String,
}

impl SimpleConcatenationStrategy {
    pub const DEFAULT_SEPARATOR: &'static str = "\n";

    pub fn new() -> Self {
        Self::with_separator(Self::DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn name(&self) -> &'static str {
        "concat"
    }
}

impl Default for SimpleConcatenationStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ContextText> CombinationStrategy<C> for SimpleConcatenationStrategy {
    type Output = String;

    fn name(&self) -> &str {
        SimpleConcatenationStrategy::name(self)
    }

    fn combine(&self, contexts: Vec<SourcedContext<C>>) -> Result<String, CombineError> {
        let parts: Vec<_> = contexts.iter().map(|c| c.context.as_text()).collect();
        Ok(parts.join(self.separator.as_str()))
    }
}
