use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Identity snapshot sent to the token authority when minting a bearer
/// token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenClaims {
    pub id: i32,
    pub status: String,
    pub roles: Vec<String>,
}

/// Failure of an external delegate call. Never retried; callers log the
/// cause and surface a generic message to the client.
#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("delegate disabled by configuration")]
    Disabled,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    BadResponse(String),
}

/// External authority minting bearer session tokens.
#[async_trait]
pub trait TokenAuthority: Send + Sync {
    async fn issue(&self, claims: &TokenClaims) -> Result<String, DelegateError>;
}

/// Email dispatch collaborator. The contract is fire-and-forget: `Ok`
/// means the message was handed off, not that it was delivered.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_email(
        &self,
        address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DelegateError>;
}
