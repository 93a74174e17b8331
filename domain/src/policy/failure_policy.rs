//! Failure policy rules

use serde::{Deserialize, Serialize};

/// Rule for handling partial provider failure
///
/// - `FailFast`: any failed provider fails the whole gather
/// - `BestEffort`: failures are dropped, whatever succeeded is combined (default)
/// - `BestEffortWithThreshold(n)`: like `BestEffort`, but at least n providers must succeed
///
/// # Example
///
/// ```
/// use orchestra_domain::policy::{FailurePolicy, PolicyVerdict};
///
/// let policy = FailurePolicy::BestEffortWithThreshold(2);
/// assert_eq!(policy.evaluate(2, 1), PolicyVerdict::Combine);
/// assert_eq!(
///     policy.evaluate(1, 2),
///     PolicyVerdict::Insufficient { required: 2, succeeded: 1 }
/// );
///
/// let strict = FailurePolicy::FailFast;
/// assert_eq!(strict.evaluate(2, 1), PolicyVerdict::Abort);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail if any provider fails
    FailFast,

    /// Combine whatever succeeded, including nothing
    #[default]
    BestEffort,

    /// Combine whatever succeeded, as long as at least this many did
    BestEffortWithThreshold(usize),
}

/// Decision taken by a [`FailurePolicy`] over a settled fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyVerdict {
    /// Feed the successes to the strategy
    Combine,
    /// At least one provider failed under `FailFast`
    Abort,
    /// Fewer successes than the threshold requires
    Insufficient { required: usize, succeeded: usize },
}

impl FailurePolicy {
    /// Decide what to do with a fan-out that produced `succeeded` successes and `failed` failures
    pub fn evaluate(&self, succeeded: usize, failed: usize) -> PolicyVerdict {
        match self {
            FailurePolicy::FailFast if failed > 0 => PolicyVerdict::Abort,
            FailurePolicy::FailFast | FailurePolicy::BestEffort => PolicyVerdict::Combine,
            FailurePolicy::BestEffortWithThreshold(required) if succeeded < *required => {
                PolicyVerdict::Insufficient {
                    required: *required,
                    succeeded,
                }
            }
            FailurePolicy::BestEffortWithThreshold(_) => PolicyVerdict::Combine,
        }
    }

    /// Minimum number of successes this policy needs out of `total` providers
    pub fn required_successes(&self, total: usize) -> usize {
        match self {
            FailurePolicy::FailFast => total,
            FailurePolicy::BestEffort => 0,
            FailurePolicy::BestEffortWithThreshold(n) => *n,
        }
    }

    /// Get a human-readable description of this policy
    pub fn description(&self) -> String {
        match self {
            FailurePolicy::FailFast => "fail fast (every provider must succeed)".to_string(),
            FailurePolicy::BestEffort => "best effort (combine whatever succeeded)".to_string(),
            FailurePolicy::BestEffortWithThreshold(n) => {
                format!("best effort with at least {} successes", n)
            }
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "failfast" => Ok(FailurePolicy::FailFast),
            "best_effort" | "besteffort" | "continue" => Ok(FailurePolicy::BestEffort),
            s if s.starts_with("threshold:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after threshold:")?
                    .parse()
                    .map_err(|_| "Invalid number for threshold")?;
                Ok(FailurePolicy::BestEffortWithThreshold(n))
            }
            _ => Err(format!(
                "Unknown failure policy: {}. Valid: fail_fast, best_effort, threshold:N",
                s
            )),
        }
    }
}
