use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::interfaces::{StateStore, VectorStoreGateway};
use crate::domain::{matches_project, CollectionRef, DomainError};

/// Keeps the side-car state file consistent with the vector store after
/// deletions.
///
/// Every read-modify-write of a state file runs under a per-file async lock,
/// so two concurrent deletions against the same collection cannot interleave
/// their writes. Vector store calls stay outside the lock.
pub struct StateReconciler {
    store: Arc<dyn StateStore>,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl StateReconciler {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Remove `project` from the collection's state record.
    /// Returns whether the file changed on disk.
    pub async fn remove_project(
        &self,
        collection: &CollectionRef,
        project: &str,
    ) -> Result<bool, DomainError> {
        let lock = self.lock_for(collection).await;
        let _guard = lock.lock().await;

        let Some(mut state) = self.store.load(collection).await? else {
            debug!("No state file for collection '{}'", collection.name());
            return Ok(false);
        };

        if !state.remove_project(project) {
            debug!(
                "Project '{}' not tracked in state file for '{}'",
                project,
                collection.name()
            );
            return Ok(false);
        }

        self.store.save(collection, &state).await?;
        info!(
            "Removed '{}' from state file for '{}' ({} entries remain)",
            project,
            collection.name(),
            state.len()
        );
        Ok(true)
    }

    /// Remove `project` from the state record only when the vector store no
    /// longer holds any of its documents. Folder deletions go through here so
    /// a project with surviving documents keeps its processed marker.
    pub async fn remove_project_if_orphaned(
        &self,
        collection: &CollectionRef,
        project: &str,
        gateway: &dyn VectorStoreGateway,
    ) -> Result<bool, DomainError> {
        let remaining = gateway.list_documents(collection).await?;
        if remaining
            .iter()
            .any(|doc| matches_project(doc.id(), project))
        {
            debug!(
                "Project '{}' still has documents in '{}', keeping state entry",
                project,
                collection.name()
            );
            return Ok(false);
        }

        self.remove_project(collection, project).await
    }

    /// Drop the state file alongside a cleared collection.
    /// Returns whether a file was actually removed.
    pub async fn clear(&self, collection: &CollectionRef) -> Result<bool, DomainError> {
        let lock = self.lock_for(collection).await;
        let _guard = lock.lock().await;

        self.store.delete(collection).await
    }

    async fn lock_for(&self, collection: &CollectionRef) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(collection.state_file_path())
            .or_default()
            .clone()
    }
}
