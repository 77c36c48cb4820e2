use async_trait::async_trait;

use crate::domain::{DomainError, Session};

/// Resolves request tokens to authenticated sessions.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// The session behind a token, or `None` when the token is unknown.
    async fn verify(&self, token: &str) -> Result<Option<Session>, DomainError>;
}
