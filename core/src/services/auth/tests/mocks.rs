//! Mock email sender and test harness for authentication service tests

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;
use crate::repositories::{
    MockResetTokenRepository, MockTokenRepository, MockUserRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::email::EmailService;
use crate::services::token::{TokenService, TokenServiceConfig};

/// A recorded outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub token: String,
    pub base_url: String,
}

/// Mock email sender that records sends and can be told to fail
pub struct MockEmailService {
    pub sent: Arc<RwLock<Vec<SentEmail>>>,
    pub failing: Arc<RwLock<bool>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            failing: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn last_sent(&self) -> Option<SentEmail> {
        self.sent.read().await.last().cloned()
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
        if *self.failing.read().await {
            return Err(DomainError::Internal {
                message: "mail provider unavailable".to_string(),
            });
        }
        self.sent.write().await.push(SentEmail {
            to: to.to_string(),
            token: reset_token.to_string(),
            base_url: base_url.to_string(),
        });
        Ok(())
    }
}

pub type TestAuthService =
    AuthService<MockUserRepository, MockTokenRepository, MockResetTokenRepository, MockEmailService>;

/// Everything a test needs: the service plus handles to its mocks
pub struct TestContext {
    pub service: TestAuthService,
    pub users: Arc<MockUserRepository>,
    pub tokens: MockTokenRepository,
    pub resets: Arc<MockResetTokenRepository>,
    pub email: Arc<MockEmailService>,
    pub token_service: Arc<TokenService<MockTokenRepository>>,
}

/// Build a fully mocked authentication service
pub fn context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let tokens = MockTokenRepository::new();
    let resets = Arc::new(MockResetTokenRepository::new());
    let email = Arc::new(MockEmailService::new());

    let token_service = Arc::new(
        TokenService::new(tokens.clone(), TokenServiceConfig::default()).unwrap(),
    );

    let service = AuthService::new(
        users.clone(),
        token_service.clone(),
        resets.clone(),
        email.clone(),
        AuthServiceConfig::default(),
    );

    TestContext {
        service,
        users,
        tokens,
        resets,
        email,
        token_service,
    }
}
