//! Dictionary merge strategy
//!
//! Merges key-value contexts left to right. What happens when two providers
//! supply the same key is decided by a [`CollisionPolicy`]. Nested values are
//! always replaced wholesale; there is no deep merge.

use super::{CombinationStrategy, CombineError};
use crate::providers::{ProviderId, SourcedContext};
use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// How a key supplied by more than one provider is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later provider overwrites the earlier value
    #[default]
    LastWins,
    /// The first provider's value is kept
    FirstWins,
    /// A collision fails the merge with [`CombineError::MergeConflict`]
    FailOnConflict,
    /// Colliding values are collected into an array
    CombineLists,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::LastWins => "last_wins",
            CollisionPolicy::FirstWins => "first_wins",
            CollisionPolicy::FailOnConflict => "fail_on_conflict",
            CollisionPolicy::CombineLists => "combine_lists",
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_wins" | "overwrite" => Ok(CollisionPolicy::LastWins),
            "first_wins" | "keep_first" => Ok(CollisionPolicy::FirstWins),
            "fail_on_conflict" | "error" => Ok(CollisionPolicy::FailOnConflict),
            "combine_lists" => Ok(CollisionPolicy::CombineLists),
            other => Err(format!(
                "Unknown collision policy: {}. Valid: last_wins, first_wins, fail_on_conflict, combine_lists",
                other
            )),
        }
    }
}

/// Merges JSON object contexts into one object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DictionaryMergeStrategy {
    policy: CollisionPolicy,
}

impl DictionaryMergeStrategy {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn name(&self) -> &'static str {
        "dictionary"
    }

    fn merge(
        &self,
        contexts: impl IntoIterator<Item = (ProviderId, Map<String, Value>)>,
    ) -> Result<Map<String, Value>, CombineError> {
        let mut merged = Map::new();
        // Which provider currently owns each key, for conflict reporting
        let mut owners: HashMap<String, ProviderId> = HashMap::new();

        for (provider, context) in contexts {
            for (key, value) in context {
                match merged.entry(key) {
                    Entry::Vacant(slot) => {
                        owners.insert(slot.key().clone(), provider.clone());
                        slot.insert(value);
                    }
                    Entry::Occupied(mut slot) => match self.policy {
                        CollisionPolicy::LastWins => {
                            owners.insert(slot.key().clone(), provider.clone());
                            slot.insert(value);
                        }
                        CollisionPolicy::FirstWins => {}
                        CollisionPolicy::FailOnConflict => {
                            let key = slot.key().clone();
                            let first = owners
                                .get(&key)
                                .cloned()
                                .unwrap_or_else(|| provider.clone());
                            return Err(CombineError::MergeConflict {
                                key,
                                first,
                                second: provider,
                            });
                        }
                        CollisionPolicy::CombineLists => append_value(slot.get_mut(), value),
                    },
                }
            }
        }

        Ok(merged)
    }
}

/// Turn `existing` into an array (if needed) and add `value` to it, flattening arrays
fn append_value(existing: &mut Value, value: Value) {
    if !existing.is_array() {
        let previous = existing.take();
        *existing = Value::Array(vec![previous]);
    }
    if let Value::Array(items) = existing {
        match value {
            Value::Array(more) => items.extend(more),
            other => items.push(other),
        }
    }
}

impl CombinationStrategy<Map<String, Value>> for DictionaryMergeStrategy {
    type Output = Map<String, Value>;

    fn name(&self) -> &str {
        DictionaryMergeStrategy::name(self)
    }

    fn combine(
        &self,
        contexts: Vec<SourcedContext<Map<String, Value>>>,
    ) -> Result<Map<String, Value>, CombineError> {
        self.merge(contexts.into_iter().map(|c| (c.provider, c.context)))
    }
}

/// Accepts arbitrary JSON; every context must be an object
impl CombinationStrategy<Value> for DictionaryMergeStrategy {
    type Output = Value;

    fn name(&self) -> &str {
        DictionaryMergeStrategy::name(self)
    }

    fn combine(&self, contexts: Vec<SourcedContext<Value>>) -> Result<Value, CombineError> {
        let maps = contexts
            .into_iter()
            .map(|c| match c.context {
                Value::Object(map) => Ok((c.provider, map)),
                _ => Err(CombineError::NotAMapping {
                    provider: c.provider,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.merge(maps).map(Value::Object)
    }
}
