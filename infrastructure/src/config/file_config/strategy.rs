//! Strategy configuration from TOML (`[strategy]` section)
//!
//! ```toml
//! [strategy]
//! kind = "dictionary"       # or "concat", "source_keyed"
//! collision = "first_wins"  # dictionary only
//! separator = "\n---\n"     # concat only
//! ```

use crate::strategy::{ConfiguredStrategy, StrategyKind};
use orchestra_domain::{CollisionPolicy, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStrategyConfig {
    pub kind: String,
    /// Separator for concatenation (default: newline)
    pub separator: Option<String>,
    /// Collision policy for dictionary merging
    pub collision: String,
}

impl Default for FileStrategyConfig {
    fn default() -> Self {
        Self {
            kind: StrategyKind::default().to_string(),
            separator: None,
            collision: CollisionPolicy::default().to_string(),
        }
    }
}

impl FileStrategyConfig {
    pub fn parse_kind(&self) -> (StrategyKind, Vec<ConfigIssue>) {
        match self.kind.parse::<StrategyKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => (
                StrategyKind::default(),
                vec![invalid_value("strategy.kind", &self.kind, StrategyKind::default())],
            ),
        }
    }

    pub fn parse_collision(&self) -> (CollisionPolicy, Vec<ConfigIssue>) {
        match self.collision.parse::<CollisionPolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => (
                CollisionPolicy::default(),
                vec![invalid_value(
                    "strategy.collision",
                    &self.collision,
                    CollisionPolicy::default(),
                )],
            ),
        }
    }

    /// Build the configured strategy, collecting parse issues
    pub fn to_strategy(&self) -> (ConfiguredStrategy, Vec<ConfigIssue>) {
        let (kind, mut issues) = self.parse_kind();
        let (collision, collision_issues) = self.parse_collision();
        issues.extend(collision_issues);

        let strategy = ConfiguredStrategy::new(kind, self.separator.as_deref(), collision);
        (strategy, issues)
    }
}

fn invalid_value(field: &str, value: &str, fallback: impl std::fmt::Display) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
        },
        format!(
            "{}: unknown value '{}', falling back to '{}'",
            field, value, fallback
        ),
    )
}
