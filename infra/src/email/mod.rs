//! Outbound email senders implementing `store_core::services::email::EmailService`.

pub mod mail_api;
pub mod mock;

pub use mail_api::MailApiEmailService;
pub use mock::MockEmailService;

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
