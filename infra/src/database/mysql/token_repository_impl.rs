//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh token records are keyed by the exact signed token string and
//! are append-only: rows are revoked, never deleted. Rotation runs in a
//! transaction so revoke-old and create-new commit together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::time::Duration;
use uuid::Uuid;

use store_core::domain::entities::token::RefreshToken;
use store_core::errors::{DomainError, TokenError};
use store_core::repositories::TokenRepository;

use super::{db_error, with_query_timeout, DEFAULT_QUERY_TIMEOUT};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Bound on a single store operation
    query_timeout: Duration,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
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

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| row_error("id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| row_error("user_id", e))?;

        Ok(RefreshToken {
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
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| row_error("is_revoked", e))?,
        })
    }
}

fn row_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, error),
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token, created_at, expires_at, is_revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        with_query_timeout(self.query_timeout, "create refresh token", async {
            sqlx::query(query)
                .bind(token.id.to_string())
                .bind(token.user_id.to_string())
                .bind(&token.token)
                .bind(token.created_at)
                .bind(token.expires_at)
                .bind(token.is_revoked)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("create refresh token", e))?;

            Ok(token)
        })
        .await
    }

    async fn find_by_token_if_valid(
        &self,
        token: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token = ? AND is_revoked = FALSE AND expires_at > ?
            LIMIT 1
        "#;

        with_query_timeout(self.query_timeout, "find refresh token", async {
            let row = sqlx::query(query)
                .bind(token)
                .bind(Utc::now())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find refresh token", e))?;

            row.map(|r| Self::row_to_token(&r)).transpose()
        })
        .await
    }

    async fn revoke_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token = ? AND is_revoked = FALSE
        "#;

        with_query_timeout(self.query_timeout, "revoke refresh token", async {
            let result = sqlx::query(query)
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("revoke refresh token", e))?;

            Ok(result.rows_affected() > 0)
        })
        .await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE user_id = ? AND is_revoked = FALSE
        "#;

        with_query_timeout(self.query_timeout, "revoke user tokens", async {
            let result = sqlx::query(query)
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("revoke user tokens", e))?;

            Ok(result.rows_affected() as usize)
        })
        .await
    }

    async fn rotate(
        &self,
        old_token: &str,
        replacement: RefreshToken,
    ) -> Result<RefreshToken, DomainError> {
        with_query_timeout(self.query_timeout, "rotate refresh token", async {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| db_error("rotate refresh token", e))?;

            // The revoke only matches a still-unrevoked row; of two
            // concurrent rotations of the same token, exactly one sees
            // rows_affected == 1 here.
            let revoked = sqlx::query(
                r#"
                UPDATE refresh_tokens
                SET is_revoked = TRUE
                WHERE token = ? AND is_revoked = FALSE
                "#,
            )
            .bind(old_token)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("rotate refresh token", e))?;

            if revoked.rows_affected() == 0 {
                tx.rollback()
                    .await
                    .map_err(|e| db_error("rotate refresh token", e))?;
                return Err(DomainError::Token(TokenError::InvalidRefreshToken));
            }

            sqlx::query(
                r#"
                INSERT INTO refresh_tokens (
                    id, user_id, token, created_at, expires_at, is_revoked
                ) VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(replacement.id.to_string())
            .bind(replacement.user_id.to_string())
            .bind(&replacement.token)
            .bind(replacement.created_at)
            .bind(replacement.expires_at)
            .bind(replacement.is_revoked)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("rotate refresh token", e))?;

            tx.commit()
                .await
                .map_err(|e| db_error("rotate refresh token", e))?;

            Ok(replacement)
        })
        .await
    }
}
