//! Domain entities representing core business objects.

pub mod reset_token;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use reset_token::{
    PasswordResetToken, RESET_TOKEN_BYTES, RESET_TOKEN_EXPIRY_HOURS,
};
pub use token::{
    Claims, RefreshToken, TokenPair, TokenType, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE,
    JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{User, UserProfile, UserRole};
