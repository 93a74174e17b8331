//! Strategy that keeps every context under its provider's name

use super::{CombinationStrategy, CombineError};
use crate::providers::SourcedContext;
use serde::Serialize;
use serde_json::{Map, Value};

/// Builds a JSON object with one entry per provider.
///
/// The key is the provider name; a repeated name falls back to the full
/// `name#index` identity so no context is lost. Works for heterogeneous
/// contexts as long as they serialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceKeyedStrategy;

impl SourceKeyedStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "source_keyed"
    }
}

impl<C: Serialize> CombinationStrategy<C> for SourceKeyedStrategy {
    type Output = Value;

    fn name(&self) -> &str {
        SourceKeyedStrategy::name(self)
    }

    fn combine(&self, contexts: Vec<SourcedContext<C>>) -> Result<Value, CombineError> {
        let mut keyed = Map::new();

        for sourced in contexts {
            let value =
                serde_json::to_value(&sourced.context).map_err(|e| CombineError::Serialization {
                    provider: sourced.provider.clone(),
                    message: e.to_string(),
                })?;

            let key = if keyed.contains_key(&sourced.provider.name) {
                sourced.provider.to_string()
            } else {
                sourced.provider.name.clone()
            };
            keyed.insert(key, value);
        }

        Ok(Value::Object(keyed))
    }
}
