use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::VectorStoreGateway;
use crate::application::reconciler::StateReconciler;
use crate::domain::{matches_folder, CollectionRef, DomainError};

/// Use case for deleting every document under one folder of a project.
pub struct DeleteFolderUseCase {
    gateway: Arc<dyn VectorStoreGateway>,
    reconciler: Arc<StateReconciler>,
}

impl DeleteFolderUseCase {
    pub fn new(gateway: Arc<dyn VectorStoreGateway>, reconciler: Arc<StateReconciler>) -> Self {
        Self {
            gateway,
            reconciler,
        }
    }

    /// Deletes the folder's documents, then drops the project from the state
    /// file only when the deletion left the project without any documents.
    /// A project with live documents in sibling folders keeps its processed
    /// marker.
    pub async fn execute(
        &self,
        collection: &CollectionRef,
        project: &str,
        folder: &str,
    ) -> Result<u64, DomainError> {
        let folder = folder.trim_end_matches('/');

        info!(
            "Deleting folder '{}' of project '{}' from collection '{}'",
            folder,
            project,
            collection.name()
        );

        let documents = self.gateway.list_documents(collection).await?;
        let ids: Vec<String> = documents
            .iter()
            .filter(|doc| matches_folder(doc.id(), project, folder))
            .map(|doc| doc.id().to_string())
            .collect();

        let deleted = self.gateway.delete_documents(collection, &ids).await?;

        if let Err(err) = self
            .reconciler
            .remove_project_if_orphaned(collection, project, self.gateway.as_ref())
            .await
        {
            warn!(
                "State reconciliation after deleting folder '{}' failed: {}",
                folder, err
            );
        }

        info!("Deleted {} documents under '{}'", deleted, folder);

        Ok(deleted)
    }
}
