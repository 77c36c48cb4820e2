use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::VectorStoreGateway;
use crate::application::reconciler::StateReconciler;
use crate::domain::{CollectionRef, DomainError};

/// Use case for dropping an entire collection plus its state file.
pub struct ClearCollectionUseCase {
    gateway: Arc<dyn VectorStoreGateway>,
    reconciler: Arc<StateReconciler>,
}

impl ClearCollectionUseCase {
    pub fn new(gateway: Arc<dyn VectorStoreGateway>, reconciler: Arc<StateReconciler>) -> Self {
        Self {
            gateway,
            reconciler,
        }
    }

    /// Drops the collection from the vector store, then removes its state
    /// file and aliases. Returns how many documents the collection held.
    pub async fn execute(&self, collection: &CollectionRef) -> Result<u64, DomainError> {
        info!("Clearing collection '{}'", collection.name());

        let prior_count = self.gateway.delete_collection(collection).await?;

        if let Err(err) = self.reconciler.clear(collection).await {
            warn!(
                "State file cleanup for '{}' failed: {}",
                collection.name(),
                err
            );
        }

        info!(
            "Collection '{}' cleared ({} documents dropped)",
            collection.name(),
            prior_count
        );

        Ok(prior_count)
    }
}
