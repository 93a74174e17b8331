//! Use cases (application services)

pub mod gather_context;
pub mod orchestrator;
pub mod propagate_update;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
