//! Authentication response value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{User, UserProfile};

/// Response returned after successful signup, login, or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Newly issued token pair
    pub tokens: TokenPair,

    /// Profile of the authenticated user
    pub user: UserProfile,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and user
    pub fn new(tokens: TokenPair, user: &User) -> Self {
        Self {
            tokens,
            user: user.profile(),
        }
    }
}
