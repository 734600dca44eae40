//! Main authentication service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use store_shared::utils::validation::{
    is_valid_email, is_valid_password, is_valid_role, sanitize,
};

use crate::domain::entities::reset_token::PasswordResetToken;
use crate::domain::entities::token::TokenType;
use crate::domain::entities::user::{User, UserProfile, UserRole};
use crate::domain::value_objects::{
    AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    SignupRequest, UpdateProfileRequest,
};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use crate::services::email::EmailService;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service orchestrating accounts, tokens, and resets
pub struct AuthService<U, T, P, E>
where
    U: UserRepository,
    T: TokenRepository,
    P: ResetTokenRepository,
    E: EmailService,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Token service for issuance, validation, and rotation
    token_service: Arc<TokenService<T>>,
    /// Reset token repository for password-reset persistence
    reset_token_repository: Arc<P>,
    /// Outbound email sender (best-effort)
    email_service: Arc<E>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T, P, E> AuthService<U, T, P, E>
where
    U: UserRepository,
    T: TokenRepository,
    P: ResetTokenRepository,
    E: EmailService,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for account persistence
    /// * `token_service` - Token lifecycle manager
    /// * `reset_token_repository` - Repository for reset tokens
    /// * `email_service` - Notification sender for reset links
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        reset_token_repository: Arc<P>,
        email_service: Arc<E>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            reset_token_repository,
            email_service,
            config,
        }
    }

    /// Register a new account and issue its first token pair
    ///
    /// # Errors
    ///
    /// * `ValidationError` - Bad email format, weak password, unknown role
    /// * `AuthError::UserAlreadyExists` - Email already registered
    pub async fn signup(&self, request: SignupRequest) -> DomainResult<AuthResponse> {
        let email = sanitize(&request.email);

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_password(&request.password) {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let role_str = request.role.unwrap_or_else(|| "customer".to_string());
        if !is_valid_role(&role_str) {
            return Err(ValidationError::InvalidRole { role: role_str }.into());
        }
        let role = role_str.parse::<UserRole>().unwrap_or_default();

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let user = User::new(
            email,
            &request.password,
            sanitize(&request.first_name),
            sanitize(&request.last_name),
            sanitize(&request.phone_number),
            role,
        )?;
        let user = self.user_repository.create(user).await?;

        let pair = self
            .token_service
            .issue_token_pair(user.id, &user.email, user.role)?;
        self.token_service
            .persist_refresh_token(user.id, &pair)
            .await?;

        tracing::info!(user_id = %user.id, "new account registered");
        Ok(AuthResponse::new(pair, &user))
    }

    /// Authenticate with email and password
    ///
    /// Unknown user, wrong password, and role mismatch all fail with the
    /// same `InvalidCredentials` error so callers cannot probe accounts.
    /// A successful login revokes every prior session before issuing a
    /// new pair.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<AuthResponse> {
        let email = sanitize(&request.email);
        let expected_role = if request.is_admin {
            UserRole::Admin
        } else {
            UserRole::Customer
        };

        let user = self
            .user_repository
            .find_active_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.role != expected_role {
            return Err(AuthError::InvalidCredentials.into());
        }

        // Single-session policy: each login invalidates earlier sessions.
        self.token_service.revoke_all_user_tokens(user.id).await?;

        let pair = self
            .token_service
            .issue_token_pair(user.id, &user.email, user.role)?;
        self.token_service
            .persist_refresh_token(user.id, &pair)
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
        Ok(AuthResponse::new(pair, &user))
    }

    /// Exchange a refresh token for a fresh pair (rotation)
    ///
    /// The presented token must be a validly signed refresh token whose
    /// server-side record is non-revoked and unexpired, owned by an
    /// active account. Rotation is strictly one-time-use; every failure
    /// mode collapses to `InvalidRefreshToken`.
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        // Step 1: signature/expiry/structure, then the type discriminator
        let claims = self
            .token_service
            .validate_token(refresh_token)
            .map_err(|_| TokenError::InvalidRefreshToken)?;
        if claims.token_type != TokenType::Refresh {
            return Err(TokenError::InvalidRefreshToken.into());
        }

        // Step 2: server-side record; absence is indistinguishable from expiry
        let record = self
            .token_service
            .find_valid_refresh_token(refresh_token)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        // Step 3: owner must still be active
        let user = self
            .user_repository
            .find_active_by_id(record.user_id)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        // Step 4: revoke-old + create-new commit together
        let pair = self.token_service.rotate_refresh_token(&record, &user).await?;

        Ok(AuthResponse::new(pair, &user))
    }

    /// Revoke exactly the given refresh token
    ///
    /// Idempotent: revoking an already-revoked or unknown token is not
    /// an error.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let revoked = self
            .token_service
            .revoke_refresh_token(refresh_token)
            .await?;
        if !revoked {
            tracing::debug!("logout for unknown or already-revoked token");
        }
        Ok(())
    }

    /// Revoke every non-revoked refresh token for a user
    pub async fn logout_all(&self, user_id: Uuid) -> DomainResult<usize> {
        let count = self.token_service.revoke_all_user_tokens(user_id).await?;
        tracing::info!(user_id = %user_id, count, "revoked all sessions");
        Ok(count)
    }

    /// Fetch an active user by ID
    pub async fn get_user_by_id(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_active_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "user".to_string(),
            })
    }

    /// Request a password reset link
    ///
    /// Always succeeds from the caller's perspective, whether or not the
    /// email belongs to an account. When it does, all prior unused reset
    /// tokens are superseded and a fresh link is emailed best-effort.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> DomainResult<()> {
        let email = sanitize(&request.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let user = match self.user_repository.find_active_by_email(&email).await? {
            Some(user) => user,
            // Same response shape as the success path
            None => return Ok(()),
        };

        self.reset_token_repository
            .invalidate_all_unused_for_user(user.id)
            .await?;

        let token_value = PasswordResetToken::generate_token();
        let record = PasswordResetToken::with_expiry(
            user.id,
            token_value.clone(),
            Utc::now() + Duration::seconds(self.config.reset_token_expiry_secs),
        );
        self.reset_token_repository.create(record).await?;

        if let Err(e) = self
            .email_service
            .send_password_reset_email(&user.email, &token_value, &self.config.base_url)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "failed to send password reset email");
        }

        Ok(())
    }

    /// Check a reset token without consuming it
    ///
    /// Returns the owner's profile (for UI display) when the token is
    /// unused, unexpired, and owned by an active account.
    pub async fn validate_reset_token(&self, token: &str) -> DomainResult<UserProfile> {
        let record = self
            .reset_token_repository
            .find_by_token_if_valid(token)
            .await?
            .ok_or(TokenError::InvalidResetToken)?;

        let user = self
            .user_repository
            .find_active_by_id(record.user_id)
            .await?
            .ok_or(TokenError::InvalidResetToken)?;

        Ok(user.profile())
    }

    /// Consume a reset token and set a new password
    ///
    /// On success the token is marked used and every refresh token for
    /// the account is revoked, forcing re-login everywhere.
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> DomainResult<()> {
        if !is_valid_password(&request.new_password) {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let record = self
            .reset_token_repository
            .find_by_token_if_valid(&request.token)
            .await?
            .ok_or(TokenError::InvalidResetToken)?;

        let mut user = self
            .user_repository
            .find_active_by_id(record.user_id)
            .await?
            .ok_or(TokenError::InvalidResetToken)?;

        user.set_password(&request.new_password)?;
        self.user_repository.update(user.clone()).await?;

        self.reset_token_repository.mark_used(&request.token).await?;

        self.token_service.revoke_all_user_tokens(user.id).await?;

        tracing::info!(user_id = %user.id, "password reset completed");
        Ok(())
    }

    /// Change the password of an authenticated user
    ///
    /// Requires the current password to verify against the stored hash.
    /// Existing sessions are revoked after the change, matching
    /// `reset_password`.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> DomainResult<()> {
        if !is_valid_password(&request.new_password) {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let mut user = self
            .user_repository
            .find_active_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "user".to_string(),
            })?;

        if !user.verify_password(&request.current_password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        user.set_password(&request.new_password)?;
        self.user_repository.update(user).await?;

        self.logout_all(user_id).await?;

        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }

    /// Update the profile of an authenticated user
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> DomainResult<UserProfile> {
        let email = sanitize(&request.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let mut user = self
            .user_repository
            .find_active_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "user".to_string(),
            })?;

        user.email = email;
        user.first_name = sanitize(&request.first_name);
        user.last_name = sanitize(&request.last_name);
        user.phone_number = sanitize(&request.phone_number);
        user.updated_at = Utc::now();

        let user = self.user_repository.update(user).await?;
        Ok(user.profile())
    }
}
