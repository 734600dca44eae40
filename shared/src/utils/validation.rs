//! Input validation helpers for signup and profile payloads

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Roles an account may hold
pub const VALID_ROLES: &[&str] = &["admin", "customer"];

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Check that an email address has a plausible shape
///
/// Format check only; deliverability is not this layer's concern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check that a password meets the minimum policy
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
}

/// Check that a role is one of the known account roles
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Strip leading and trailing whitespace from user-supplied text
pub fn sanitize(input: &str) -> String {
    input.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user.name+tag@example.co.uk"));
        assert!(is_valid_email("UPPER@CASE.COM"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn test_password_policy() {
        assert!(is_valid_password("password1"));
        assert!(is_valid_password("12345678"));
        assert!(!is_valid_password("1234567"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn test_role_whitelist() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("customer"));
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role("Admin"));
    }

    #[test]
    fn test_sanitize_trims() {
        assert_eq!(sanitize("  jane@example.com \n"), "jane@example.com");
        assert_eq!(sanitize("plain"), "plain");
    }
}
