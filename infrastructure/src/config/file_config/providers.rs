//! Provider configuration from TOML (`[[providers]]` tables)
//!
//! Each table is tagged by `kind`; the order of the tables is the
//! registration order of the providers.
//!
//! ```toml
//! [[providers]]
//! kind = "memory"
//! name = "memory"
//! sample = true
//!
//! [[providers]]
//! kind = "files"
//! name = "notes"
//! root = "./notes"
//! extensions = ["md", "txt"]
//! latency_ms = 50
//! ```

use crate::providers::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// One configured provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileProviderConfig {
    Memory {
        #[serde(default)]
        name: String,
        #[serde(default)]
        latency_ms: Option<u64>,
        /// Seed the store with the built-in sample entries
        #[serde(default)]
        sample: bool,
        #[serde(default)]
        entries: HashMap<String, String>,
    },
    Documents {
        #[serde(default)]
        name: String,
        #[serde(default)]
        latency_ms: Option<u64>,
        #[serde(default)]
        sample: bool,
        #[serde(default)]
        documents: Vec<Document>,
    },
    Files {
        #[serde(default)]
        name: String,
        #[serde(default)]
        latency_ms: Option<u64>,
        root: PathBuf,
        #[serde(default)]
        extensions: Vec<String>,
        #[serde(default)]
        max_bytes: Option<usize>,
    },
    Api {
        #[serde(default)]
        name: String,
        #[serde(default)]
        latency_ms: Option<u64>,
        #[serde(default)]
        sample: bool,
        #[serde(default)]
        endpoints: HashMap<String, Value>,
    },
}

impl FileProviderConfig {
    /// Providers registered when no `[[providers]]` table is present:
    /// the sample memory store followed by the sample document store
    pub fn default_set() -> Vec<FileProviderConfig> {
        vec![
            Self::Memory {
                name: "memory".to_string(),
                latency_ms: None,
                sample: true,
                entries: HashMap::new(),
            },
            Self::Documents {
                name: "documents".to_string(),
                latency_ms: None,
                sample: true,
                documents: Vec::new(),
            },
        ]
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory { .. } => "memory",
            Self::Documents { .. } => "documents",
            Self::Files { .. } => "files",
            Self::Api { .. } => "api",
        }
    }

    /// Configured name, or the kind when the name is blank
    pub fn name(&self) -> &str {
        let name = match self {
            Self::Memory { name, .. }
            | Self::Documents { name, .. }
            | Self::Files { name, .. }
            | Self::Api { name, .. } => name.trim(),
        };
        if name.is_empty() { self.kind() } else { name }
    }

    pub fn has_blank_name(&self) -> bool {
        match self {
            Self::Memory { name, .. }
            | Self::Documents { name, .. }
            | Self::Files { name, .. }
            | Self::Api { name, .. } => name.trim().is_empty(),
        }
    }

    pub fn latency(&self) -> Option<Duration> {
        match self {
            Self::Memory { latency_ms, .. }
            | Self::Documents { latency_ms, .. }
            | Self::Files { latency_ms, .. }
            | Self::Api { latency_ms, .. } => latency_ms.map(Duration::from_millis),
        }
    }
}
