//! Password reset token entity.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reset token expiration time (1 hour)
pub const RESET_TOKEN_EXPIRY_HOURS: i64 = 1;

/// Entropy of a reset token in bytes before hex encoding
pub const RESET_TOKEN_BYTES: usize = 32;

/// Single-use, time-boxed password reset token
///
/// At most one unused token per user is meaningful: issuing a new one
/// marks all prior unused tokens for that user as used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    /// Unique identifier for the reset token record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// High-entropy token value, hex-encoded; unique
    pub token: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been consumed or superseded
    pub is_used: bool,
}

impl PasswordResetToken {
    /// Creates a new reset token record with the default lifetime
    pub fn new(user_id: Uuid, token: String) -> Self {
        Self::with_expiry(
            user_id,
            token,
            Utc::now() + Duration::hours(RESET_TOKEN_EXPIRY_HOURS),
        )
    }

    /// Creates a new reset token record with an explicit expiry
    pub fn with_expiry(user_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            created_at: Utc::now(),
            expires_at,
            is_used: false,
        }
    }

    /// Generates a cryptographically random token value
    ///
    /// 32 bytes from the OS RNG, hex-encoded to 64 characters.
    pub fn generate_token() -> String {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Checks if the reset token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the token can still be consumed (unused and unexpired)
    pub fn is_valid(&self) -> bool {
        !self.is_used && !self.is_expired()
    }

    /// Marks the token as consumed
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_shape() {
        let token = PasswordResetToken::generate_token();
        assert_eq!(token.len(), RESET_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_tokens_differ() {
        let a = PasswordResetToken::generate_token();
        let b = PasswordResetToken::generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_token_is_valid() {
        let user_id = Uuid::new_v4();
        let token = PasswordResetToken::new(user_id, PasswordResetToken::generate_token());

        assert_eq!(token.user_id, user_id);
        assert!(!token.is_used);
        assert!(!token.is_expired());
        assert!(token.is_valid());
    }

    #[test]
    fn test_mark_used() {
        let mut token =
            PasswordResetToken::new(Uuid::new_v4(), PasswordResetToken::generate_token());

        token.mark_used();

        assert!(token.is_used);
        assert!(!token.is_valid());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let mut token =
            PasswordResetToken::new(Uuid::new_v4(), PasswordResetToken::generate_token());
        token.expires_at = Utc::now() - Duration::minutes(1);

        assert!(token.is_expired());
        assert!(!token.is_valid());
    }
}
