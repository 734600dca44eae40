//! Repository interfaces for persistence, with in-memory mocks for tests.

pub mod reset;
pub mod token;
pub mod user;

pub use reset::{MockResetTokenRepository, ResetTokenRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
