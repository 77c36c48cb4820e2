use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::{SessionVerifier, StateReconciler, StateStore, VectorStoreGateway};
use crate::domain::{CollectionRef, DomainError};
use crate::{
    ClearCollectionUseCase, DeleteDocumentUseCase, DeleteFolderUseCase, DeleteProjectUseCase,
    InMemoryGateway, JsonStateStore, ListDocumentsUseCase, PythonChromaGateway,
    StaticTokenVerifier,
};

pub struct ContainerConfig {
    /// Default filesystem location of the persistent vector store. Requests
    /// may override it per call.
    pub store_path: PathBuf,
    /// Interpreter used to run the vector store helpers.
    pub python: String,
    /// Replace the ChromaDB-backed gateway with an in-memory store. Used by
    /// tests and local development.
    pub memory_storage: bool,
    /// Keep timestamped copies of state files before overwriting them.
    pub state_backups: bool,
    /// Session token table for the HTTP API. With no file configured every
    /// request is rejected.
    pub token_file: Option<PathBuf>,
}

pub struct Container {
    gateway: Arc<dyn VectorStoreGateway>,
    state_store: Arc<dyn StateStore>,
    reconciler: Arc<StateReconciler>,
    verifier: Arc<dyn SessionVerifier>,
    config: ContainerConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let gateway: Arc<dyn VectorStoreGateway> = if config.memory_storage {
            debug!("Using in-memory vector store");
            Arc::new(InMemoryGateway::new())
        } else {
            debug!(
                "Using ChromaDB store at {:?} via '{}'",
                config.store_path, config.python
            );
            Arc::new(PythonChromaGateway::new(config.python.clone()))
        };

        let state_store: Arc<dyn StateStore> =
            Arc::new(JsonStateStore::new().with_backups(config.state_backups));
        let reconciler = Arc::new(StateReconciler::new(state_store.clone()));

        let verifier: Arc<dyn SessionVerifier> = match &config.token_file {
            Some(path) => Arc::new(StaticTokenVerifier::from_file(path).await?),
            None => {
                warn!("No session token file configured, every API request will be rejected");
                Arc::new(StaticTokenVerifier::empty())
            }
        };

        Ok(Self {
            gateway,
            state_store,
            reconciler,
            verifier,
            config,
        })
    }

    /// Assembles a container from pre-built parts. Tests use this to seed
    /// the gateway before serving requests against it.
    pub fn from_parts(
        gateway: Arc<dyn VectorStoreGateway>,
        state_store: Arc<dyn StateStore>,
        verifier: Arc<dyn SessionVerifier>,
        config: ContainerConfig,
    ) -> Self {
        let reconciler = Arc::new(StateReconciler::new(state_store.clone()));
        Self {
            gateway,
            state_store,
            reconciler,
            verifier,
            config,
        }
    }

    pub fn delete_document_use_case(&self) -> DeleteDocumentUseCase {
        DeleteDocumentUseCase::new(self.gateway.clone(), self.reconciler.clone())
    }

    pub fn delete_folder_use_case(&self) -> DeleteFolderUseCase {
        DeleteFolderUseCase::new(self.gateway.clone(), self.reconciler.clone())
    }

    pub fn delete_project_use_case(&self) -> DeleteProjectUseCase {
        DeleteProjectUseCase::new(self.gateway.clone(), self.reconciler.clone())
    }

    pub fn clear_collection_use_case(&self) -> ClearCollectionUseCase {
        ClearCollectionUseCase::new(self.gateway.clone(), self.reconciler.clone())
    }

    pub fn list_documents_use_case(&self) -> ListDocumentsUseCase {
        ListDocumentsUseCase::new(self.gateway.clone())
    }

    pub fn verifier(&self) -> Arc<dyn SessionVerifier> {
        self.verifier.clone()
    }

    pub fn state_store(&self) -> Arc<dyn StateStore> {
        self.state_store.clone()
    }

    pub fn store_path(&self) -> &Path {
        &self.config.store_path
    }

    /// Resolves a collection reference against the default store path, or an
    /// explicit per-request override.
    pub fn collection(
        &self,
        name: &str,
        store_override: Option<&str>,
    ) -> Result<CollectionRef, DomainError> {
        let store_path = match store_override {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => self.config.store_path.clone(),
        };
        CollectionRef::new(name, store_path)
    }
}
