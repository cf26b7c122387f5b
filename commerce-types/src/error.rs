//! Error types for the payment and user services.

use crate::domain::{PaymentId, UserId};

/// Domain-level errors (invalid values or requests).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// A lookup by primary or secondary key found nothing.
///
/// The messages are part of the service contract and embed the entity name
/// and the key verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("Payment with id: {0} not found")]
    Payment(PaymentId),

    #[error("User with id: {0} not found")]
    User(UserId),

    #[error("User with username: {0} not found")]
    Username(String),
}

impl NotFoundError {
    /// Name of the entity that was looked up.
    pub fn entity(&self) -> &'static str {
        match self {
            NotFoundError::Payment(_) => "Payment",
            NotFoundError::User(_) | NotFoundError::Username(_) => "User",
        }
    }
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(DomainError::ValidationError(msg)) => AppError::BadRequest(msg),
            RepoError::NotFound => AppError::Internal("Entity vanished during write".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::Conflict(e),
        }
    }
}
