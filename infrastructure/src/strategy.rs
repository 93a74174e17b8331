//! Strategy selection by name
//!
//! Configuration and the command line pick a strategy by name at runtime, so
//! the concrete strategies are wrapped in one enum that merges JSON contexts
//! into a JSON value.

use orchestra_domain::{
    CollisionPolicy, CombinationStrategy, CombineError, DictionaryMergeStrategy,
    SimpleConcatenationStrategy, SourceKeyedStrategy, SourcedContext,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names of the selectable strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Concat,
    Dictionary,
    SourceKeyed,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Concat => "concat",
            StrategyKind::Dictionary => "dictionary",
            StrategyKind::SourceKeyed => "source_keyed",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "concat" | "concatenate" | "text" => Ok(StrategyKind::Concat),
            "dictionary" | "dict" | "merge" => Ok(StrategyKind::Dictionary),
            "source_keyed" | "by_source" => Ok(StrategyKind::SourceKeyed),
            other => Err(format!(
                "Unknown strategy: {}. Valid: concat, dictionary, source_keyed",
                other
            )),
        }
    }
}

/// A strategy chosen at runtime
#[derive(Debug, Clone)]
pub enum ConfiguredStrategy {
    Concat(SimpleConcatenationStrategy),
    Dictionary(DictionaryMergeStrategy),
    SourceKeyed(SourceKeyedStrategy),
}

impl ConfiguredStrategy {
    /// Build a strategy from its kind plus the options that apply to it.
    ///
    /// `separator` only affects concatenation and `collision` only affects
    /// dictionary merging.
    pub fn new(kind: StrategyKind, separator: Option<&str>, collision: CollisionPolicy) -> Self {
        match kind {
            StrategyKind::Concat => Self::Concat(match separator {
                Some(separator) => SimpleConcatenationStrategy::with_separator(separator),
                None => SimpleConcatenationStrategy::new(),
            }),
            StrategyKind::Dictionary => Self::Dictionary(DictionaryMergeStrategy::new(collision)),
            StrategyKind::SourceKeyed => Self::SourceKeyed(SourceKeyedStrategy::new()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Concat(_) => StrategyKind::Concat,
            Self::Dictionary(_) => StrategyKind::Dictionary,
            Self::SourceKeyed(_) => StrategyKind::SourceKeyed,
        }
    }
}

impl Default for ConfiguredStrategy {
    fn default() -> Self {
        Self::Concat(SimpleConcatenationStrategy::new())
    }
}

impl CombinationStrategy<Value> for ConfiguredStrategy {
    type Output = Value;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    fn combine(&self, contexts: Vec<SourcedContext<Value>>) -> Result<Value, CombineError> {
        match self {
            Self::Concat(strategy) => strategy.combine(contexts).map(Value::String),
            Self::Dictionary(strategy) => strategy.combine(contexts),
            Self::SourceKeyed(strategy) => strategy.combine(contexts),
        }
    }
}
