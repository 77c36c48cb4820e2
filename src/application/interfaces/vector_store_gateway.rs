use async_trait::async_trait;

use crate::domain::{CollectionRef, DocumentRecord, DomainError};

/// Bulk document and collection operations against the vector store.
#[async_trait]
pub trait VectorStoreGateway: Send + Sync {
    /// Every document currently held by the collection, ids plus metadata.
    async fn list_documents(
        &self,
        collection: &CollectionRef,
    ) -> Result<Vec<DocumentRecord>, DomainError>;

    /// Delete the given document ids in one round trip.
    /// Returns the number of documents actually removed.
    async fn delete_documents(
        &self,
        collection: &CollectionRef,
        ids: &[String],
    ) -> Result<u64, DomainError>;

    /// Drop the whole collection and report how many documents it held.
    /// Dropping a collection that does not exist is not an error and
    /// reports zero.
    async fn delete_collection(&self, collection: &CollectionRef) -> Result<u64, DomainError>;
}
