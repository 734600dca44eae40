//! Inbound request payloads consumed from the transport layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload for account creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub phone_number: String,

    /// Requested role; defaults to "customer" when absent
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload for login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// Whether the caller is logging into the admin surface
    #[serde(default)]
    pub is_admin: bool,
}

/// Payload for token refresh
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Payload for logout
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Payload for requesting a password reset link
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Payload for consuming a password reset token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,

    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Payload for an authenticated password change
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,

    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Payload for profile updates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let ok = SignupRequest {
            email: "a@b.com".to_string(),
            password: "password1".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            role: None,
        };
        assert!(ok.validate().is_ok());

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            password: "short".to_string(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_defaults_to_customer() {
        let json = r#"{"email":"a@b.com","password":"password1"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert!(!request.is_admin);
    }

    #[test]
    fn test_reset_password_request_policy() {
        let request = ResetPasswordRequest {
            token: "t".to_string(),
            new_password: "1234567".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_token_payloads_deserialize() {
        let refresh: RefreshRequest =
            serde_json::from_str(r#"{"refresh_token":"abc"}"#).unwrap();
        assert_eq!(refresh.refresh_token, "abc");
        assert!(refresh.validate().is_ok());

        let logout: LogoutRequest = serde_json::from_str(r#"{"refresh_token":""}"#).unwrap();
        assert!(logout.validate().is_err());
    }
}
