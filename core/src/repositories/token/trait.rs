//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are keyed by the exact signed token string and are
/// append-only: revocation flips a flag, nothing is ever deleted. All
/// mutations to a user's token rows go through this interface so the
/// store's transactional isolation covers them.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token string)
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a usable record by exact token string
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - A non-revoked, unexpired record exists
    /// * `Ok(None)` - No such record, or it is revoked or expired
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_token_if_valid(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke the record matching this exact token string
    ///
    /// Idempotent from the caller's perspective.
    ///
    /// # Returns
    /// * `Ok(true)` - A non-revoked record was revoked
    /// * `Ok(false)` - No matching non-revoked record
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke_by_token(&self, token: &str) -> Result<bool, DomainError>;

    /// Revoke every non-revoked record for a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Atomically revoke `old_token` and persist `replacement`
    ///
    /// Both effects commit together or not at all. The revocation must
    /// only match a record that is still non-revoked; when two rotations
    /// race on the same token, exactly one wins and the loser fails with
    /// `TokenError::InvalidRefreshToken`.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The persisted replacement record
    /// * `Err(DomainError)` - Old token missing/already revoked, or the
    ///   transaction failed (nothing committed)
    async fn rotate(
        &self,
        old_token: &str,
        replacement: RefreshToken,
    ) -> Result<RefreshToken, DomainError>;
}
