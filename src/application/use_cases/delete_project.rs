use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::VectorStoreGateway;
use crate::application::reconciler::StateReconciler;
use crate::domain::{matches_project, CollectionRef, DomainError};

/// Use case for deleting all documents belonging to a project.
pub struct DeleteProjectUseCase {
    gateway: Arc<dyn VectorStoreGateway>,
    reconciler: Arc<StateReconciler>,
}

impl DeleteProjectUseCase {
    pub fn new(gateway: Arc<dyn VectorStoreGateway>, reconciler: Arc<StateReconciler>) -> Self {
        Self {
            gateway,
            reconciler,
        }
    }

    /// Deletes every document carrying the project's id prefix, then drops
    /// the project from the state file unconditionally.
    pub async fn execute(
        &self,
        collection: &CollectionRef,
        project: &str,
    ) -> Result<u64, DomainError> {
        info!(
            "Deleting project '{}' from collection '{}'",
            project,
            collection.name()
        );

        let documents = self.gateway.list_documents(collection).await?;
        let ids: Vec<String> = documents
            .iter()
            .filter(|doc| matches_project(doc.id(), project))
            .map(|doc| doc.id().to_string())
            .collect();

        let deleted = self.gateway.delete_documents(collection, &ids).await?;

        if let Err(err) = self.reconciler.remove_project(collection, project).await {
            warn!(
                "State reconciliation after deleting project '{}' failed: {}",
                project, err
            );
        }

        info!("Deleted {} documents for project '{}'", deleted, project);

        Ok(deleted)
    }
}
