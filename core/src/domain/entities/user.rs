//! User entity representing a registered account in the catalog.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Role held by an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Catalog administrator
    Admin,
    /// Shopping customer
    Customer,
}

impl UserRole {
    /// String form used in claims and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Customer => "customer",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "customer" => Ok(UserRole::Customer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User entity representing a registered account
///
/// Emails are stored exactly as given (case-sensitive) and must be
/// unique. Accounts are deactivated rather than deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique email address
    pub email: String,

    /// Salted bcrypt hash of the password; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Phone number
    pub phone_number: String,

    /// Account role
    pub role: UserRole,

    /// Whether the account is active; inactive accounts cannot
    /// authenticate
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user, hashing the supplied password
    ///
    /// # Arguments
    ///
    /// * `email` - Unique email address
    /// * `password` - Plaintext password; hashed with bcrypt before storage
    /// * `first_name` / `last_name` / `phone_number` - Profile fields
    /// * `role` - Account role
    ///
    /// # Returns
    ///
    /// A new `User` or an internal error if hashing fails
    pub fn new(
        email: String,
        password: &str,
        first_name: String,
        last_name: String,
        phone_number: String,
        role: UserRole,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            password_hash: hash_password(password)?,
            first_name,
            last_name,
            phone_number,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verifies a candidate password against the stored hash
    ///
    /// bcrypt performs the salted, constant-time comparison; a malformed
    /// stored hash counts as a failed verification.
    pub fn verify_password(&self, candidate: &str) -> bool {
        verify(candidate, &self.password_hash).unwrap_or(false)
    }

    /// Replaces the stored password hash with a hash of `new_password`
    pub fn set_password(&mut self, new_password: &str) -> Result<(), DomainError> {
        self.password_hash = hash_password(new_password)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Deactivates the account (soft delete)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Checks if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Builds the serializable profile projection of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Profile projection of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Phone number
    pub phone_number: String,

    /// Account role
    pub role: UserRole,

    /// Whether the account is active
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    hash(password, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}
