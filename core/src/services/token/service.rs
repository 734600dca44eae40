//! Main token service implementation

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair, TokenType};
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service managing the lifecycle of access and refresh tokens
///
/// Issuance and validation are pure signing operations; persistence and
/// rotation go through the token repository.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for refresh token persistence
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a signing error when the configuration
    /// is unusable. Construction failure should halt startup.
    pub fn new(repository: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Token(TokenError::SigningFailed));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Pinning the algorithm here rejects substitution at decode time:
        // a token whose header names a different algorithm fails before
        // its signature is considered.
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a signed access/refresh token pair for a user
    ///
    /// Pure signing: no I/O happens here. The caller persists the
    /// refresh side via [`persist_refresh_token`](Self::persist_refresh_token).
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's email, embedded in the claims
    /// * `role` - The user's role, embedded in the claims
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Two independently signed tokens with their expiries
    /// * `Err(DomainError)` - Signing failed (signer misconfiguration)
    pub fn issue_token_pair(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, DomainError> {
        let access_claims = Claims::new(
            user_id,
            email,
            role,
            TokenType::Access,
            Duration::seconds(self.config.access_token_expiry_secs),
            &self.config.issuer,
            &self.config.audience,
        );
        let refresh_claims = Claims::new(
            user_id,
            email,
            role,
            TokenType::Refresh,
            Duration::seconds(self.config.refresh_token_expiry_secs),
            &self.config.issuer,
            &self.config.audience,
        );

        let access_token = self.encode_jwt(&access_claims)?;
        let refresh_token = self.encode_jwt(&refresh_claims)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_claims.exp,
            refresh_claims.exp,
        ))
    }

    /// Validates a token and returns its claims
    ///
    /// Checks signature, algorithm family, issuer, audience, expiry and
    /// not-before. Server-side revocation is deliberately not consulted;
    /// callers needing revocation-aware validation cross-check the
    /// refresh token store.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(DomainError)` - Expired, not yet valid, or malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        DomainError::Token(TokenError::TokenNotYetValid)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature
                    | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Persists the refresh-token record for a freshly issued pair
    ///
    /// The record's expiry matches the refresh token's `exp` claim.
    pub async fn persist_refresh_token(
        &self,
        user_id: Uuid,
        pair: &TokenPair,
    ) -> Result<RefreshToken, DomainError> {
        let expires_at = Utc
            .timestamp_opt(pair.refresh_expires_at, 0)
            .single()
            .ok_or_else(|| DomainError::Internal {
                message: "Invalid refresh expiry timestamp".to_string(),
            })?;

        let record =
            RefreshToken::with_expiry(user_id, pair.refresh_token.clone(), expires_at);
        self.repository.create(record).await
    }

    /// Looks up a usable refresh-token record by exact token string
    pub async fn find_valid_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        self.repository.find_by_token_if_valid(token).await
    }

    /// Rotates a refresh token, issuing a fresh pair
    ///
    /// Issues new tokens, then atomically revokes the old record and
    /// creates the new one. Rotation is strictly one-time-use: when two
    /// rotations race on the same record, the loser fails with
    /// `InvalidRefreshToken` and commits nothing.
    ///
    /// # Arguments
    ///
    /// * `old` - The record being rotated (already validated by the caller)
    /// * `user` - The record's active owner
    pub async fn rotate_refresh_token(
        &self,
        old: &RefreshToken,
        user: &User,
    ) -> Result<TokenPair, DomainError> {
        let pair = self.issue_token_pair(user.id, &user.email, user.role)?;

        let expires_at = Utc
            .timestamp_opt(pair.refresh_expires_at, 0)
            .single()
            .ok_or_else(|| DomainError::Internal {
                message: "Invalid refresh expiry timestamp".to_string(),
            })?;
        let replacement =
            RefreshToken::with_expiry(user.id, pair.refresh_token.clone(), expires_at);

        self.repository.rotate(&old.token, replacement).await?;

        tracing::debug!(user_id = %user.id, "rotated refresh token");
        Ok(pair)
    }

    /// Revokes a specific refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Token was revoked
    /// * `Ok(false)` - No matching non-revoked record
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, DomainError> {
        self.repository.revoke_by_token(token).await
    }

    /// Revokes all refresh tokens for a user
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of tokens revoked
    pub async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.repository.revoke_all_for_user(user_id).await
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::SigningFailed))
    }
}
