pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ClearCollectionUseCase, DeleteDocumentUseCase, DeleteFolderUseCase, DeleteProjectUseCase,
    ListDocumentsUseCase, SessionVerifier, StateReconciler, StateStore, VectorStoreGateway,
};

pub use cli::Commands;

pub use connector::{
    build_router, run_server, Container, ContainerConfig, InMemoryGateway, JsonStateStore,
    PythonChromaGateway, StaticTokenVerifier,
};

pub use domain::{
    matches_folder, matches_project, project_prefix, CollectionRef, DocKind, DocumentId,
    DocumentRecord, DomainError, ProjectStateFile, Session,
};
