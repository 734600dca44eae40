//! Domain-specific error types for authentication and token operations
//!
//! Variants stay fine-grained for logging and tests; the conversions to
//! `ErrorResponse` collapse credential and token failures to generic
//! messages so callers cannot distinguish which predicate failed.

use store_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Uniform failure for unknown user, wrong password, or role
    /// mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Account inactive")]
    AccountInactive,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid token type")]
    InvalidTokenType,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Signer misconfiguration; should halt startup rather than occur
    /// per-request
    #[error("Token signing failed")]
    SigningFailed,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    #[error("Required field: {field}")]
    RequiredField { field: String },
}

/// Convert AuthError to a client-facing error payload
impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        match err {
            // Identity-hiding: one code and message for every failed
            // login predicate
            AuthError::InvalidCredentials => {
                ErrorResponse::new("INVALID_CREDENTIALS", "Invalid credentials")
            }
            AuthError::UserAlreadyExists => {
                ErrorResponse::new("USER_ALREADY_EXISTS", "User already exists")
            }
            AuthError::UserNotFound => ErrorResponse::new("USER_NOT_FOUND", "User not found"),
            AuthError::AccountInactive => {
                ErrorResponse::new("ACCOUNT_INACTIVE", "Account is inactive")
            }
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        (&err).into()
    }
}

/// Convert TokenError to a client-facing error payload
///
/// Signature, expiry, type, and revocation failures are never
/// distinguished to the caller.
impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        match err {
            TokenError::InvalidResetToken => {
                ErrorResponse::new("INVALID_RESET_TOKEN", "Invalid or expired reset token")
            }
            TokenError::SigningFailed => {
                ErrorResponse::new("TOKEN_GENERATION_FAILED", "Failed to generate tokens")
            }
            _ => ErrorResponse::new("INVALID_TOKEN", "Invalid or expired token"),
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        (&err).into()
    }
}

/// Convert ValidationError to a client-facing error payload
impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        let code = match err {
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
            ValidationError::InvalidRole { .. } => "INVALID_ROLE",
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
        };
        ErrorResponse::new(code, err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        (&err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let expired: ErrorResponse = TokenError::TokenExpired.into();
        let revoked: ErrorResponse = TokenError::TokenRevoked.into();
        let bad_signature: ErrorResponse = TokenError::InvalidSignature.into();

        assert_eq!(expired.error, revoked.error);
        assert_eq!(expired.message, revoked.message);
        assert_eq!(expired.error, bad_signature.error);
        assert_eq!(expired.message, bad_signature.message);
    }

    #[test]
    fn test_invalid_credentials_payload() {
        let response: ErrorResponse = AuthError::InvalidCredentials.into();
        assert_eq!(response.error, "INVALID_CREDENTIALS");
        assert_eq!(response.message, "Invalid credentials");
    }

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::PasswordTooShort { min: 8 };
        assert!(err.to_string().contains("8"));
    }
}
