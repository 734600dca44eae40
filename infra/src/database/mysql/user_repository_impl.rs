//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::time::Duration;
use uuid::Uuid;

use store_core::domain::entities::user::{User, UserRole};
use store_core::errors::DomainError;
use store_core::repositories::UserRepository;

use super::{db_error, with_query_timeout, DEFAULT_QUERY_TIMEOUT};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Bound on a single store operation
    query_timeout: Duration,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
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

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| row_error("id", e))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| row_error("role", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| row_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| row_error("password_hash", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| row_error("first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| row_error("last_name", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| row_error("phone_number", e))?,
            role: role.parse::<UserRole>().map_err(|e| DomainError::Internal {
                message: format!("Invalid stored role: {}", e),
            })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| row_error("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| row_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| row_error("updated_at", e))?,
        })
    }
}

fn row_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, error),
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, phone_number, role, is_active, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        // BINARY forces a case-sensitive match; utf8mb4 collations
        // compare case-insensitively by default
        let query = format!(
            r#"
            SELECT {}
            FROM users
            WHERE BINARY email = ? AND is_active = TRUE
            LIMIT 1
            "#,
            USER_COLUMNS
        );

        with_query_timeout(self.query_timeout, "find user by email", async {
            let row = sqlx::query(&query)
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find user by email", e))?;

            row.map(|r| Self::row_to_user(&r)).transpose()
        })
        .await
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM users
            WHERE id = ? AND is_active = TRUE
            LIMIT 1
            "#,
            USER_COLUMNS
        );

        with_query_timeout(self.query_timeout, "find user by id", async {
            let row = sqlx::query(&query)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find user by id", e))?;

            row.map(|r| Self::row_to_user(&r)).transpose()
        })
        .await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE BINARY email = ?) as present";

        with_query_timeout(self.query_timeout, "check email exists", async {
            let row = sqlx::query(query)
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("check email exists", e))?;

            let present: i64 = row.try_get("present").map_err(|e| row_error("present", e))?;
            Ok(present == 1)
        })
        .await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name,
                phone_number, role, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        with_query_timeout(self.query_timeout, "create user", async {
            sqlx::query(query)
                .bind(user.id.to_string())
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.phone_number)
                .bind(user.role.as_str())
                .bind(user.is_active)
                .bind(user.created_at)
                .bind(user.updated_at)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("create user", e))?;

            Ok(user)
        })
        .await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, password_hash = ?, first_name = ?, last_name = ?,
                phone_number = ?, role = ?, is_active = ?, updated_at = ?
            WHERE id = ?
        "#;

        with_query_timeout(self.query_timeout, "update user", async {
            // MySQL reports changed rows, not matched rows, so a no-op
            // update is indistinguishable from a missing row here; the
            // service layer looks the user up before saving.
            sqlx::query(query)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.phone_number)
                .bind(user.role.as_str())
                .bind(user.is_active)
                .bind(user.updated_at)
                .bind(user.id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("update user", e))?;

            Ok(user)
        })
        .await
    }
}
