//! Shared utilities and common types for the Storefront server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response wrappers and error payloads
//! - Validation utilities
//!
//! It contains no business logic and depends on no other workspace member.

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, JwtConfig,
    PasswordResetConfig,
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::validation;
