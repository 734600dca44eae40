//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, TokenError, ValidationError};

use store_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Backing-store failure; retryable by the caller. The message is
    /// for logs only and never reaches clients.
    #[error("Database query failed: {message}")]
    DatabaseQuery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether the caller may retry the operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::DatabaseQuery { .. })
    }

    /// Client-facing payload for this error
    ///
    /// Store and internal failures collapse to a generic "try again"
    /// message; detail stays in logs.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => {
                ErrorResponse::new("INVALID_INPUT", message.clone())
            }
            DomainError::NotFound { resource } => {
                ErrorResponse::new("NOT_FOUND", format!("{} not found", resource))
            }
            DomainError::DatabaseQuery { .. } => ErrorResponse::new(
                "TEMPORARY_ERROR",
                "A temporary error occurred, please try again",
            ),
            DomainError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
            DomainError::Auth(err) => err.into(),
            DomainError::Token(err) => err.into(),
            DomainError::ValidationErr(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_is_retryable_and_generic() {
        let err = DomainError::DatabaseQuery {
            message: "connection reset by peer".to_string(),
        };
        assert!(err.is_retryable());

        let response = err.to_error_response();
        assert_eq!(response.error, "TEMPORARY_ERROR");
        assert!(!response.message.contains("connection"));
    }

    #[test]
    fn test_token_error_bridges_to_generic_payload() {
        let err: DomainError = TokenError::TokenRevoked.into();
        let response = err.to_error_response();
        assert_eq!(response.error, "INVALID_TOKEN");
    }
}
