//! Password reset token repository interface and mock implementation.

pub mod mock;
mod r#trait;

pub use mock::MockResetTokenRepository;
pub use r#trait::ResetTokenRepository;
