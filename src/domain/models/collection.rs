use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Filename prefix of the processed-repositories state record kept next to
/// the vector store.
pub const STATE_FILE_PREFIX: &str = "github_repos_state_";

/// A named collection inside a persistent vector store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    name: String,
    store_path: PathBuf,
}

impl CollectionRef {
    pub fn new(
        name: impl Into<String>,
        store_path: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_input("collection name must not be empty"));
        }
        Ok(Self {
            name,
            store_path: store_path.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Collection name with every character outside `[A-Za-z0-9_-]` replaced
    /// by `_`, as used in the state-file name.
    pub fn sanitized_name(&self) -> String {
        sanitize_collection_name(&self.name)
    }

    pub fn state_file_name(&self) -> String {
        format!("{}{}.json", STATE_FILE_PREFIX, self.sanitized_name())
    }

    /// Canonical location of the side-car state record:
    /// `<store_path>/github_repos_state_<sanitized>.json`.
    pub fn state_file_path(&self) -> PathBuf {
        self.store_path.join(self.state_file_name())
    }

    /// State filename a pre-sanitization writer would have used, when it
    /// differs from the canonical one and is safe to treat as a plain
    /// filename. Read as a fallback and removed when clearing.
    pub fn legacy_state_file_name(&self) -> Option<String> {
        let sanitized = self.sanitized_name();
        if self.name == sanitized || self.name.contains('/') || self.name.contains('\\') {
            return None;
        }
        Some(format!("{}{}.json", STATE_FILE_PREFIX, self.name))
    }

    pub fn legacy_state_file_path(&self) -> Option<PathBuf> {
        self.legacy_state_file_name()
            .map(|name| self.store_path.join(name))
    }
}

fn sanitize_collection_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
