//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Configuration for the HTTP mail API used to deliver transactional email
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Mail API endpoint
    pub api_url: String,

    /// Mail API key
    pub api_key: String,

    /// From address for outbound mail
    pub from_email: String,

    /// Whether outbound email is enabled; disabled in tests/dev by default
    #[serde(default)]
    pub enabled: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.sendgrid.com/v3/mail/send"),
            api_key: String::new(),
            from_email: String::from("noreply@storefront.dev"),
            enabled: false,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let api_key = env_or("MAIL_API_KEY", "");
        Self {
            api_url: env_or("MAIL_API_URL", "https://api.sendgrid.com/v3/mail/send"),
            enabled: !api_key.is_empty(),
            api_key,
            from_email: env_or("FROM_EMAIL", "noreply@storefront.dev"),
        }
    }
}
