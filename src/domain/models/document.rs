use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document as surfaced by the vector store gateway: its composite id and
/// metadata (`source`, `filename`, `created_at`, and so on). The embedding
/// vector and the chunk content are owned by the store and never cross the
/// gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    id: String,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl DocumentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// String-typed metadata lookup; non-string values yield `None`.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}
