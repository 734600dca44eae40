//! HTTP mail-API email sender
//!
//! Delivers transactional email through a SendGrid-compatible JSON API.
//! Failures are reported to the caller, which treats delivery as
//! best-effort and only logs them.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use store_core::errors::DomainError;
use store_core::services::email::EmailService;
use store_shared::config::EmailConfig;

use crate::email::mask_email;
use crate::InfrastructureError;

/// Timeout for a single mail API request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Email sender backed by a SendGrid-compatible HTTP API
pub struct MailApiEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl MailApiEmailService {
    /// Create a new mail API sender
    ///
    /// Fails when outbound email is enabled but no API key is set.
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.enabled && config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "MAIL_API_KEY must be set when email is enabled".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InfrastructureError::Email(format!("Failed to build client: {}", e)))?;

        info!(from = %config.from_email, enabled = config.enabled, "mail API sender initialized");

        Ok(Self { client, config })
    }

    fn reset_email_body(email: &str, reset_link: &str) -> String {
        format!(
            r#"<html>
<body>
    <h2>Password Reset Request</h2>
    <p>We received a request to reset the password for <strong>{}</strong>.</p>
    <p><a href="{}">Reset your password</a></p>
    <p>Or copy and paste this link in your browser:</p>
    <p>{}</p>
    <p>This link expires in 1 hour. If you didn't request a reset, ignore this email.</p>
</body>
</html>"#,
            email, reset_link, reset_link
        )
    }
}

#[async_trait]
impl EmailService for MailApiEmailService {
    async fn send_password_reset_email(
        &self,
        to: &str,
        reset_token: &str,
        base_url: &str,
    ) -> Result<(), DomainError> {
        if !self.config.enabled {
            debug!(to = %mask_email(to), "outbound email disabled, skipping reset email");
            return Ok(());
        }

        let reset_link = format!("{}/reset-password?token={}", base_url, reset_token);
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.config.from_email },
            "subject": "Password Reset Request",
            "content": [{
                "type": "text/html",
                "value": Self::reset_email_body(to, &reset_link),
            }],
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(to = %mask_email(to), error = %e, "mail API request failed");
                DomainError::Internal {
                    message: format!("Mail API request failed: {}", e),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(to = %mask_email(to), %status, "mail API rejected the message");
            return Err(DomainError::Internal {
                message: format!("Mail API returned status {}", status),
            });
        }

        info!(to = %mask_email(to), "password reset email sent");
        Ok(())
    }
}
