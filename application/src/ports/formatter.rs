//! Context formatter port
//!
//! An optional final transform applied to the merged context before it is
//! returned to the caller.

/// Transforms a merged context into the value returned by a gather.
///
/// The formatter takes ownership of the merged value; the orchestrator keeps
/// nothing of the pre-format value.
pub trait ContextFormatter<M>: Send + Sync {
    fn format(&self, merged: M) -> M;
}

impl<M, F> ContextFormatter<M> for F
where
    F: Fn(M) -> M + Send + Sync,
{
    fn format(&self, merged: M) -> M {
        self(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_formatter() {
        let formatter = |merged: String| format!("## Context\n{}", merged);
        assert_eq!(formatter.format("body".to_string()), "## Context\nbody");
    }
}
