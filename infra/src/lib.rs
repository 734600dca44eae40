//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Storefront
//! application. It provides concrete implementations for the persistence
//! and notification interfaces defined in `store_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations of the repository traits using SQLx
//! - **Email**: HTTP mail-API sender for password-reset notifications

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - outbound notification senders
pub mod email;

// Re-export core error types for convenience
pub use store_core::errors::{DomainError, DomainResult};

/// Errors raised while setting up or talking to infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Email service error: {0}")]
    Email(String),
}
