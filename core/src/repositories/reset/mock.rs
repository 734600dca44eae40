//! Mock implementation of ResetTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::reset_token::PasswordResetToken;
use crate::errors::DomainError;

use super::r#trait::ResetTokenRepository;

/// In-memory reset token repository for tests and demos
#[derive(Clone)]
pub struct MockResetTokenRepository {
    tokens: Arc<RwLock<HashMap<String, PasswordResetToken>>>,
}

impl MockResetTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockResetTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResetTokenRepository for MockResetTokenRepository {
    async fn create(
        &self,
        token: PasswordResetToken,
    ) -> Result<PasswordResetToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.token) {
            return Err(DomainError::Validation {
                message: "Reset token already exists".to_string(),
            });
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_if_valid(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).filter(|t| t.is_valid()).cloned())
    }

    async fn invalidate_all_unused_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;
        for record in tokens.values_mut() {
            if record.user_id == user_id && !record.is_used {
                record.mark_used();
                count += 1;
            }
        }
        Ok(count)
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(token) {
            Some(record) if !record.is_used => {
                record.mark_used();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
