//! MySQL implementation of the ResetTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::time::Duration;
use uuid::Uuid;

use store_core::domain::entities::reset_token::PasswordResetToken;
use store_core::errors::DomainError;
use store_core::repositories::ResetTokenRepository;

use super::{db_error, with_query_timeout, DEFAULT_QUERY_TIMEOUT};

/// MySQL implementation of ResetTokenRepository
pub struct MySqlResetTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Bound on a single store operation
    query_timeout: Duration,
}

impl MySqlResetTokenRepository {
    /// Create a new MySQL reset token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-query timeout
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Convert a database row to a PasswordResetToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<PasswordResetToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| row_error("id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| row_error("user_id", e))?;

        Ok(PasswordResetToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token: row.try_get("token").map_err(|e| row_error("token", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| row_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| row_error("expires_at", e))?,
            is_used: row
                .try_get("is_used")
                .map_err(|e| row_error("is_used", e))?,
        })
    }
}

fn row_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, error),
    }
}

#[async_trait]
impl ResetTokenRepository for MySqlResetTokenRepository {
    async fn create(
        &self,
        token: PasswordResetToken,
    ) -> Result<PasswordResetToken, DomainError> {
        let query = r#"
            INSERT INTO password_reset_tokens (
                id, user_id, token, created_at, expires_at, is_used
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        with_query_timeout(self.query_timeout, "create reset token", async {
            sqlx::query(query)
                .bind(token.id.to_string())
                .bind(token.user_id.to_string())
                .bind(&token.token)
                .bind(token.created_at)
                .bind(token.expires_at)
                .bind(token.is_used)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("create reset token", e))?;

            Ok(token)
        })
        .await
    }

    async fn find_by_token_if_valid(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, created_at, expires_at, is_used
            FROM password_reset_tokens
            WHERE token = ? AND is_used = FALSE AND expires_at > ?
            LIMIT 1
        "#;

        with_query_timeout(self.query_timeout, "find reset token", async {
            let row = sqlx::query(query)
                .bind(token)
                .bind(Utc::now())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find reset token", e))?;

            row.map(|r| Self::row_to_token(&r)).transpose()
        })
        .await
    }

    async fn invalidate_all_unused_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE password_reset_tokens
            SET is_used = TRUE
            WHERE user_id = ? AND is_used = FALSE
        "#;

        with_query_timeout(self.query_timeout, "invalidate reset tokens", async {
            let result = sqlx::query(query)
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("invalidate reset tokens", e))?;

            Ok(result.rows_affected() as usize)
        })
        .await
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE password_reset_tokens
            SET is_used = TRUE
            WHERE token = ? AND is_used = FALSE
        "#;

        with_query_timeout(self.query_timeout, "mark reset token used", async {
            let result = sqlx::query(query)
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("mark reset token used", e))?;

            Ok(result.rows_affected() > 0)
        })
        .await
    }
}
