//! Domain errors
//!
//! Every caller-visible message lives in the `#[error(...)]` attributes so
//! the HTTP layer can serialize errors without re-mapping strings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or malformed required field. Carries the exact
    /// caller-visible message.
    #[error("{0}")]
    Validation(&'static str),

    #[error("User does not exists")]
    NotFound,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Authentication failed")]
    BadCredentials,

    /// No token was submitted, or the account has no open recovery window.
    /// The two cases are deliberately indistinguishable.
    #[error("Invalid token for reseting password.")]
    ResetTokenMissing,

    /// A token was submitted but does not match the stored one.
    #[error("Invalid token.")]
    ResetTokenMismatch,

    #[error("Token expired, generate a new one")]
    ResetTokenExpired,

    /// Update matched zero rows (or more than one, which the id filter
    /// makes impossible in practice).
    #[error("Cannot update user. Maybe user was not found or req.body is empty!")]
    NothingUpdated,

    /// An external delegate (token authority, notification dispatcher)
    /// failed. The message is chosen at the call site; the underlying
    /// cause is logged there for operators.
    #[error("{0}")]
    Delegate(&'static str),

    /// Store failure. Surfaces as 500 with an operation-specific body.
    #[error("Database error: {0}")]
    Storage(String),

    /// Anything else unexpected (hashing failure, missing required input
    /// past validation). Surfaces as 500 with an operation-specific body.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether this error is a server fault (500) rather than a
    /// client-facing business failure (400).
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Storage(_) | DomainError::Internal(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
