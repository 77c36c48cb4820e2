use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::application::interfaces::SessionVerifier;
use crate::domain::{DomainError, Session};

/// Session verifier backed by a static token table loaded at startup.
///
/// The table maps opaque bearer tokens to the account email they belong to.
/// Tokens outside the table are rejected, and an empty table rejects every
/// request.
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    /// A verifier that rejects all tokens.
    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// Loads a `{"<token>": "<email>"}` JSON object from disk.
    pub async fn from_file(path: &Path) -> Result<Self, DomainError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::invalid_input(format!(
                "failed to read token file {}: {}",
                path.display(),
                e
            ))
        })?;
        let tokens: HashMap<String, String> = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::invalid_input(format!(
                "failed to parse token file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            "Loaded {} session token(s) from {}",
            tokens.len(),
            path.display()
        );
        Ok(Self::new(tokens))
    }
}

#[async_trait]
impl SessionVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self
            .tokens
            .get(token)
            .map(|email| Session::new(email.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_token_resolves_to_session() {
        let mut tokens = HashMap::new();
        tokens.insert("secret".to_string(), "dev@example.com".to_string());
        let verifier = StaticTokenVerifier::new(tokens);

        let session = verifier.verify("secret").await.expect("verify");
        assert_eq!(session, Some(Session::new("dev@example.com")));
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let verifier = StaticTokenVerifier::empty();
        let session = verifier.verify("nope").await.expect("verify");
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_from_file_loads_token_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, r#"{"secret": "dev@example.com"}"#).expect("write");

        let verifier = StaticTokenVerifier::from_file(&path)
            .await
            .expect("load tokens");
        let session = verifier.verify("secret").await.expect("verify");
        assert_eq!(session, Some(Session::new("dev@example.com")));
    }
}
