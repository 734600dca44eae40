//! Configuration for the authentication service

use store_shared::config::PasswordResetConfig;
use store_shared::utils::validation::MIN_PASSWORD_LENGTH;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Base URL used to build password-reset links
    pub base_url: String,
    /// Reset token lifetime in seconds
    pub reset_token_expiry_secs: i64,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            reset_token_expiry_secs: 3600,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl AuthServiceConfig {
    /// Build from the application-level reset configuration
    pub fn from_reset_config(config: &PasswordResetConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            reset_token_expiry_secs: config.token_expiry,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}
