//! Refresh token repository interface and mock implementation.

pub mod mock;
mod r#trait;

pub use mock::MockTokenRepository;
pub use r#trait::TokenRepository;
