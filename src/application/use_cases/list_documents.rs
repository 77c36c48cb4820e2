use std::sync::Arc;

use crate::application::interfaces::VectorStoreGateway;
use crate::domain::{matches_project, CollectionRef, DocumentRecord, DomainError};

/// Use case for listing the documents of a collection, optionally narrowed
/// to one project.
pub struct ListDocumentsUseCase {
    gateway: Arc<dyn VectorStoreGateway>,
}

impl ListDocumentsUseCase {
    pub fn new(gateway: Arc<dyn VectorStoreGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        collection: &CollectionRef,
        project: Option<&str>,
    ) -> Result<Vec<DocumentRecord>, DomainError> {
        let documents = self.gateway.list_documents(collection).await?;

        Ok(match project {
            Some(project) => documents
                .into_iter()
                .filter(|doc| matches_project(doc.id(), project))
                .collect(),
            None => documents,
        })
    }
}
