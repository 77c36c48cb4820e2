use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed document id: {0}")]
    MalformedId(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Vector store gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("State file error: {0}")]
    StateFile(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn malformed_id(msg: impl Into<String>) -> Self {
        Self::MalformedId(msg.into())
    }

    pub fn collection_not_found(msg: impl Into<String>) -> Self {
        Self::CollectionNotFound(msg.into())
    }

    pub fn gateway_unavailable(msg: impl Into<String>) -> Self {
        Self::GatewayUnavailable(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn state_file(msg: impl Into<String>) -> Self {
        Self::StateFile(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_collection_not_found(&self) -> bool {
        matches!(self, Self::CollectionNotFound(_))
    }

    pub fn is_gateway_unavailable(&self) -> bool {
        matches!(self, Self::GatewayUnavailable(_))
    }

    pub fn is_state_file_error(&self) -> bool {
        matches!(self, Self::StateFile(_))
    }
}
