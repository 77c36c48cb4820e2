use async_trait::async_trait;

use crate::domain::{CollectionRef, DomainError, ProjectStateFile};

/// Persistence for the side-car record of processed projects.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the collection's state record, or `None` when no file exists.
    async fn load(&self, collection: &CollectionRef)
        -> Result<Option<ProjectStateFile>, DomainError>;

    /// Persist the record, keeping the on-disk shape it was read in.
    async fn save(
        &self,
        collection: &CollectionRef,
        state: &ProjectStateFile,
    ) -> Result<(), DomainError>;

    /// Remove the state file together with any known alias files.
    /// Returns whether anything was removed.
    async fn delete(&self, collection: &CollectionRef) -> Result<bool, DomainError>;
}
