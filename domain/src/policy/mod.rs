//! Failure policy domain
//!
//! A failure policy decides, once every provider call of a fan-out has
//! settled, whether the surviving contexts are combined or the whole
//! operation fails.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  fan-out settled: n outcomes                                  │
//! │                                                              │
//! │  FailFast                  any failure  → Abort              │
//! │  BestEffort                always       → Combine            │
//! │  BestEffortWithThreshold   ok < min     → Insufficient       │
//! │                            ok >= min    → Combine            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod failure_policy;

pub use failure_policy::{FailurePolicy, PolicyVerdict};
