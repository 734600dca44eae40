//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Lookups are scoped to active accounts except `exists_by_email`,
/// which must see inactive accounts too so a deactivated email cannot
/// be re-registered.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by exact email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Active user found
    /// * `Ok(None)` - No active user with that email
    /// * `Err(DomainError)` - Database error occurred
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find an active user by ID
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Check whether any account (active or not) holds this email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError)` - Save failed (e.g., duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
