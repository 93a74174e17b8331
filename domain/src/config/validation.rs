//! Configuration issues.
//!
//! Loading configuration never fails on a questionable value; instead the
//! loader reports structured issues with a severity and the caller decides
//! what to do with them.
//!
//! # Examples
//!
//! ```
//! use orchestra_domain::config::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::warning(
//!     ConfigIssueCode::InvalidEnumValue {
//!         field: "orchestrator.policy".to_string(),
//!         value: "sometimes".to_string(),
//!     },
//!     "unknown policy, falling back to best_effort",
//! );
//! assert!(!issue.is_error());
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field did not parse into its enum.
    InvalidEnumValue { field: String, value: String },
    /// A provider entry has an empty name.
    EmptyProviderName { index: usize },
    /// The success threshold can never be met by the configured providers.
    UnreachableThreshold { required: usize, providers: usize },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
