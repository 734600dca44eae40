//! Mock email sender for development and wiring tests

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use store_core::errors::DomainError;
use store_core::services::email::EmailService;

use crate::email::mask_email;

/// Email sender that records messages instead of delivering them
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockEmailService {
    /// Create a new mock sender
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded (recipient, reset link) pairs
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_password_reset_email(
        &self,
        to: &str,
        reset_token: &str,
        base_url: &str,
    ) -> Result<(), DomainError> {
        let reset_link = format!("{}/reset-password?token={}", base_url, reset_token);
        info!(to = %mask_email(to), "mock email sender recording reset link");
        self.sent
            .write()
            .await
            .push((to.to_string(), reset_link));
        Ok(())
    }
}
