//! Local directory provider

use super::{query_terms, simulate_latency};
use async_trait::async_trait;
use orchestra_application::ContextProvider;
use orchestra_domain::ProviderError;
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Default maximum bytes read from a single file
pub const DEFAULT_MAX_BYTES: usize = 16 * 1024;

/// Reads files from a directory whose name or content mentions a query term.
///
/// The context is a JSON object mapping file name to (possibly truncated)
/// content, which makes it a natural input for dictionary merging.
///
/// # Filtering
///
/// - Only regular files directly under `root` are considered
/// - If `extensions` is non-empty, the file extension must be in the list
/// - An empty query matches every candidate file
///
/// At most `max_bytes` are read from each file; matching only sees that
/// prefix.
pub struct FileProvider {
    name: String,
    root: PathBuf,
    extensions: Vec<String>,
    max_bytes: usize,
    latency: Option<Duration>,
}

impl FileProvider {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            extensions: Vec::new(),
            max_bytes: DEFAULT_MAX_BYTES,
            latency: None,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accepts_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    async fn candidates(&self) -> Result<Vec<PathBuf>, ProviderError> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            ProviderError::invalid_input(format!(
                "cannot read directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ProviderError::failed(e.to_string()))?
        {
            let path = entry.path();
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            if is_file && self.accepts_extension(&path) {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();
        Ok(paths)
    }

    /// Read at most `max_bytes` of a file, reporting whether it was cut short
    async fn read_limited(&self, path: &Path) -> io::Result<(String, bool)> {
        let file = tokio::fs::File::open(path).await?;
        let mut bytes = Vec::new();
        // One byte past the limit distinguishes a file of exactly max_bytes from a longer one
        file.take((self.max_bytes as u64).saturating_add(1))
            .read_to_end(&mut bytes)
            .await?;
        self.decode(bytes)
    }

    fn decode(&self, mut bytes: Vec<u8>) -> io::Result<(String, bool)> {
        let truncated = bytes.len() > self.max_bytes;
        if truncated {
            bytes.truncate(self.max_bytes);
            // A multi-byte character cut at the limit is dropped whole
            if let Err(e) = std::str::from_utf8(&bytes)
                && e.error_len().is_none()
            {
                bytes.truncate(e.valid_up_to());
            }
        }
        let content =
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok((content, truncated))
    }
}

#[async_trait]
impl ContextProvider<String, Value, Value> for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &String) -> Result<Value, ProviderError> {
        simulate_latency(self.latency).await;

        let terms = query_terms(query);
        let mut found = Map::new();

        for path in self.candidates().await? {
            let (content, truncated) = match self.read_limited(&path).await {
                Ok(read) => read,
                Err(e) => {
                    warn!("Skipping unreadable file {}: {}", path.display(), e);
                    continue;
                }
            };

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let haystack = format!("{}\n{}", file_name, content).to_lowercase();
            if terms.is_empty() || terms.iter().any(|t| haystack.contains(t.as_str())) {
                let content = if truncated {
                    content + TRUNCATION_MARKER
                } else {
                    content
                };
                found.insert(file_name, Value::String(content));
            }
        }

        debug!(
            "File provider {} matched {} file(s) in {}",
            self.name,
            found.len(),
            self.root.display()
        );
        Ok(Value::Object(found))
    }
}
