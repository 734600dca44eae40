//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "storefront";

/// JWT audience
pub const JWT_AUDIENCE: &str = "storefront-api";

/// Discriminator distinguishing access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token proving identity for a single request window
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// Both token kinds carry the same claim shape; only `token_type` and
/// the expiry differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the subject
    pub email: String,

    /// Role of the subject
    pub role: UserRole,

    /// Token type discriminator
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID; makes every signed token unique even within one second
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token of the given type
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's email
    /// * `role` - The user's role
    /// * `token_type` - Access or refresh
    /// * `ttl` - Lifetime of the token from now
    /// * `issuer` / `audience` - Registered claims
    pub fn new(
        user_id: Uuid,
        email: &str,
        role: UserRole,
        token_type: TokenType,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            token_type,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Creates claims for an access token with the default lifetime
    pub fn new_access_token(user_id: Uuid, email: &str, role: UserRole) -> Self {
        Self::new(
            user_id,
            email,
            role,
            TokenType::Access,
            Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            JWT_ISSUER,
            JWT_AUDIENCE,
        )
    }

    /// Creates claims for a refresh token with the default lifetime
    pub fn new_refresh_token(user_id: Uuid, email: &str, role: UserRole) -> Self {
        Self::new(
            user_id,
            email,
            role,
            TokenType::Refresh,
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            JWT_ISSUER,
            JWT_AUDIENCE,
        )
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token record stored in the database
///
/// Records are append-only: they are revoked, never deleted. A record is
/// usable until its expiry passes or its revoked flag is set, whichever
/// comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// The exact signed token string; unique
    pub token: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked; terminal once set
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token record with the default lifetime
    pub fn new(user_id: Uuid, token: String) -> Self {
        Self::with_expiry(
            user_id,
            token,
            Utc::now() + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        )
    }

    /// Creates a new refresh token record with an explicit expiry
    ///
    /// Used when the expiry must match the `exp` claim of the signed
    /// token exactly.
    pub fn with_expiry(user_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            created_at: Utc::now(),
            expires_at,
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the refresh token is valid (not expired, not revoked)
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client after authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token expiry as a unix timestamp
    pub access_expires_at: i64,

    /// Refresh token expiry as a unix timestamp
    pub refresh_expires_at: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_at: i64,
        refresh_expires_at: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, "a@b.com", UserRole::Customer);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, UserRole::Customer);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
    }

    #[test]
    fn test_refresh_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_refresh_token(user_id, "a@b.com", UserRole::Admin);

        assert_eq!(claims.token_type, TokenType::Refresh);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(
            claims.exp - claims.iat,
            REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60
        );
    }

    #[test]
    fn test_claims_are_unique_per_issue() {
        let user_id = Uuid::new_v4();
        let a = Claims::new_access_token(user_id, "a@b.com", UserRole::Customer);
        let b = Claims::new_access_token(user_id, "a@b.com", UserRole::Customer);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, "a@b.com", UserRole::Customer);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, "a@b.com", UserRole::Customer);

        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_claims_not_before() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, "a@b.com", UserRole::Customer);

        claims.nbf = Utc::now().timestamp() + 3600;

        assert!(!claims.is_valid());
    }

    #[test]
    fn test_token_type_claim_serialization() {
        let claims = Claims::new_access_token(Uuid::new_v4(), "a@b.com", UserRole::Customer);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"type\":\"access\""));
        assert!(json.contains("\"role\":\"customer\""));
    }

    #[test]
    fn test_refresh_token_record_creation() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new(user_id, "signed.token.value".to_string());

        assert_eq!(token.user_id, user_id);
        assert_eq!(token.token, "signed.token.value");
        assert!(!token.is_revoked);
        assert!(!token.is_expired());
        assert!(token.is_valid());
    }

    #[test]
    fn test_refresh_token_revocation_is_terminal() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "t".to_string());

        assert!(token.is_valid());
        token.revoke();
        assert!(token.is_revoked);
        assert!(!token.is_valid());
    }

    #[test]
    fn test_refresh_token_expiration() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "t".to_string());
        token.expires_at = Utc::now() - Duration::days(1);

        assert!(token.is_expired());
        assert!(!token.is_valid());
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 100, 200);

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
    }
}
