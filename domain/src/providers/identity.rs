//! Provider identity value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a registered provider.
///
/// The index is the provider's position in the registry and is what makes an
/// identity unique: two providers may share a name, never an index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId {
    pub index: usize,
    pub name: String,
}

impl ProviderId {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_index() {
        let id = ProviderId::new(2, "memory");
        assert_eq!(id.to_string(), "memory#2");
    }

    #[test]
    fn test_same_name_different_index_are_distinct() {
        assert_ne!(ProviderId::new(0, "docs"), ProviderId::new(1, "docs"));
    }
}
