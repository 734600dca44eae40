//! Notification sender interface for transactional email.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Outbound email delivery for the authentication flows
///
/// Delivery is best-effort: callers log failures and carry on, so an
/// unreachable mail provider never fails a password-reset request.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a password reset link to `to`
    ///
    /// The link is built as `{base_url}/reset-password?token={token}`.
    async fn send_password_reset_email(
        &self,
        to: &str,
        reset_token: &str,
        base_url: &str,
    ) -> Result<(), DomainError>;
}
