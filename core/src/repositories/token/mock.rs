//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// In-memory refresh token repository for tests and demos
///
/// A single write lock per mutation gives the same all-or-nothing
/// behavior the SQL implementation gets from transactions.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MockTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records, revoked ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.token) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_if_valid(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).filter(|t| t.is_valid()).cloned())
    }

    async fn revoke_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(token) {
            Some(record) if !record.is_revoked => {
                record.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;
        for record in tokens.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.revoke();
                count += 1;
            }
        }
        Ok(count)
    }

    async fn rotate(
        &self,
        old_token: &str,
        replacement: RefreshToken,
    ) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Revoke-old and insert-new under one lock; a concurrent rotation
        // of the same token sees it already revoked and fails here.
        match tokens.get_mut(old_token) {
            Some(record) if record.is_valid() => record.revoke(),
            _ => return Err(DomainError::Token(TokenError::InvalidRefreshToken)),
        }

        tokens.insert(replacement.token.clone(), replacement.clone());
        Ok(replacement)
    }
}
