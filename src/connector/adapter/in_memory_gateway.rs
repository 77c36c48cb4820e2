use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::interfaces::VectorStoreGateway;
use crate::domain::{CollectionRef, DocumentRecord, DomainError};

/// In-memory vector store for tests and local development. Collections are
/// plain maps keyed by collection name; document order is stable so listings
/// are deterministic.
pub struct InMemoryGateway {
    collections: Arc<Mutex<HashMap<String, BTreeMap<String, DocumentRecord>>>>,
    delete_calls: AtomicU64,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(Mutex::new(HashMap::new())),
            delete_calls: AtomicU64::new(0),
        }
    }

    /// Creates the collection if it does not exist yet.
    pub async fn create_collection(&self, collection: &CollectionRef) {
        let mut collections = self.collections.lock().await;
        collections.entry(collection.name().to_string()).or_default();
    }

    /// Seeds one document, creating the collection as needed.
    pub async fn insert(&self, collection: &CollectionRef, record: DocumentRecord) {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.name().to_string())
            .or_default()
            .insert(record.id().to_string(), record);
    }

    /// How many delete calls actually reached the store, not counting
    /// empty-id short circuits.
    pub fn delete_call_count(&self) -> u64 {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStoreGateway for InMemoryGateway {
    async fn list_documents(
        &self,
        collection: &CollectionRef,
    ) -> Result<Vec<DocumentRecord>, DomainError> {
        let collections = self.collections.lock().await;
        let documents = collections
            .get(collection.name())
            .ok_or_else(|| DomainError::collection_not_found(collection.name()))?;

        Ok(documents.values().cloned().collect())
    }

    async fn delete_documents(
        &self,
        collection: &CollectionRef,
        ids: &[String],
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let mut collections = self.collections.lock().await;
        let documents = collections
            .get_mut(collection.name())
            .ok_or_else(|| DomainError::collection_not_found(collection.name()))?;

        let mut deleted = 0;
        for id in ids {
            if documents.remove(id).is_some() {
                deleted += 1;
            }
        }

        debug!("Deleted {} of {} requested documents", deleted, ids.len());
        Ok(deleted)
    }

    async fn delete_collection(&self, collection: &CollectionRef) -> Result<u64, DomainError> {
        let mut collections = self.collections.lock().await;
        match collections.remove(collection.name()) {
            Some(documents) => Ok(documents.len() as u64),
            None => Ok(0),
        }
    }
}
