use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::VectorStoreGateway;
use crate::application::reconciler::StateReconciler;
use crate::domain::{project_prefix, CollectionRef, DomainError};

/// Use case for deleting a single document by id.
pub struct DeleteDocumentUseCase {
    gateway: Arc<dyn VectorStoreGateway>,
    reconciler: Arc<StateReconciler>,
}

impl DeleteDocumentUseCase {
    pub fn new(gateway: Arc<dyn VectorStoreGateway>, reconciler: Arc<StateReconciler>) -> Self {
        Self {
            gateway,
            reconciler,
        }
    }

    /// Deletes one document, then drops its project from the state file when
    /// no other documents for that project remain. Returns the number of
    /// documents the store actually removed (zero when the id was absent).
    pub async fn execute(&self, collection: &CollectionRef, id: &str) -> Result<u64, DomainError> {
        info!("Deleting document: {}", id);

        let ids = [id.to_string()];
        let deleted = self.gateway.delete_documents(collection, &ids).await?;

        let project = project_prefix(id);
        if let Err(err) = self
            .reconciler
            .remove_project_if_orphaned(collection, project, self.gateway.as_ref())
            .await
        {
            // The store mutation already succeeded; state drift is repaired
            // on the next reconciliation pass.
            warn!(
                "State reconciliation after deleting '{}' failed: {}",
                id, err
            );
        }

        info!("Document deleted ({} removed)", deleted);

        Ok(deleted)
    }
}
