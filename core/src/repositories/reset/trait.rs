//! Reset token repository trait for password-reset persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::reset_token::PasswordResetToken;
use crate::errors::DomainError;

/// Repository trait for PasswordResetToken persistence operations
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    /// Save a new reset token record
    async fn create(&self, token: PasswordResetToken)
        -> Result<PasswordResetToken, DomainError>;

    /// Find a consumable record by exact token string
    ///
    /// # Returns
    /// * `Ok(Some(PasswordResetToken))` - An unused, unexpired record exists
    /// * `Ok(None)` - No such record, or it is used or expired
    async fn find_by_token_if_valid(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError>;

    /// Mark all unused reset tokens for a user as used
    ///
    /// Called before issuing a new token so only the newest one is
    /// consumable.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records invalidated
    async fn invalidate_all_unused_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Mark the record matching this token string as used
    ///
    /// # Returns
    /// * `Ok(true)` - Record was marked used
    /// * `Ok(false)` - No matching unused record
    async fn mark_used(&self, token: &str) -> Result<bool, DomainError>;
}
