//! Configuration for the token service

use jsonwebtoken::Algorithm;
use store_shared::config::JwtConfig;

use crate::errors::{DomainError, TokenError};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm; must be an HMAC family member
    pub algorithm: Algorithm,
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
    /// Access token expiry in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: crate::domain::entities::token::JWT_ISSUER.to_string(),
            audience: crate::domain::entities::token::JWT_AUDIENCE.to_string(),
            access_token_expiry_secs: crate::domain::entities::token::ACCESS_TOKEN_EXPIRY_MINUTES
                * 60,
            refresh_token_expiry_secs: crate::domain::entities::token::REFRESH_TOKEN_EXPIRY_DAYS
                * 24
                * 60
                * 60,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the application-level JWT configuration
    ///
    /// Fails when the configured algorithm is unknown or outside the
    /// HMAC family; this is startup-time misconfiguration.
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = match config.algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => return Err(DomainError::Token(TokenError::SigningFailed)),
        };

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_expiry_secs: config.access_token_expiry,
            refresh_token_expiry_secs: config.refresh_token_expiry,
        })
    }
}
