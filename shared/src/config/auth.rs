//! Authentication and password-reset configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse_or};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 604_800, // 7 days
            issuer: String::from("storefront"),
            audience: String::from("storefront-api"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// Password-reset token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordResetConfig {
    /// Reset token expiry time in seconds
    pub token_expiry: i64,

    /// Base URL used to build reset links in outbound emails
    pub base_url: String,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            token_expiry: 3600, // 1 hour
            base_url: String::from("http://localhost:8080"),
        }
    }
}

/// Combined authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT signing configuration
    pub jwt: JwtConfig,

    /// Password-reset configuration
    pub password_reset: PasswordResetConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig {
                secret: env_or("JWT_SECRET", "your-secret-key-change-in-production"),
                access_token_expiry: env_parse_or("ACCESS_TOKEN_EXPIRY_SECONDS", 900),
                refresh_token_expiry: env_parse_or("REFRESH_TOKEN_EXPIRY_SECONDS", 604_800),
                issuer: env_or("JWT_ISSUER", "storefront"),
                audience: env_or("JWT_AUDIENCE", "storefront-api"),
                algorithm: env_or("JWT_ALGORITHM", "HS256"),
            },
            password_reset: PasswordResetConfig {
                token_expiry: env_parse_or("RESET_TOKEN_EXPIRY_SECONDS", 3600),
                base_url: env_or("BASE_URL", "http://localhost:8080"),
            },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
