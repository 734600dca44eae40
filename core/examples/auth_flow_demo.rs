//! End-to-end authentication flow against the in-memory repositories
//!
//! Run with: cargo run --example auth_flow_demo -p store_core

use std::sync::Arc;

use store_core::domain::value_objects::{ForgotPasswordRequest, LoginRequest, SignupRequest};
use store_core::errors::DomainError;
use store_core::repositories::{
    MockResetTokenRepository, MockTokenRepository, MockUserRepository,
};
use store_core::services::auth::{AuthService, AuthServiceConfig};
use store_core::services::email::EmailService;
use store_core::services::token::{TokenService, TokenServiceConfig};

use async_trait::async_trait;

struct StdoutEmailService;

#[async_trait]
impl EmailService for StdoutEmailService {
    async fn send_password_reset_email(
        &self,
        to: &str,
        reset_token: &str,
        base_url: &str,
    ) -> Result<(), DomainError> {
        println!("--> reset link for {}: {}/reset-password?token={}", to, base_url, reset_token);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let tokens = MockTokenRepository::new();
    let token_service = Arc::new(TokenService::new(
        tokens.clone(),
        TokenServiceConfig::default(),
    )?);
    let auth_service = AuthService::new(
        Arc::new(MockUserRepository::new()),
        token_service.clone(),
        Arc::new(MockResetTokenRepository::new()),
        Arc::new(StdoutEmailService),
        AuthServiceConfig::default(),
    );

    let signup = auth_service
        .signup(SignupRequest {
            email: "demo@example.com".to_string(),
            password: "password1".to_string(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            phone_number: String::new(),
            role: None,
        })
        .await?;
    println!("signed up user {}", signup.user.id);

    let login = auth_service
        .login(LoginRequest {
            email: "demo@example.com".to_string(),
            password: "password1".to_string(),
            is_admin: false,
        })
        .await?;
    println!("logged in, access token expires at {}", login.tokens.access_expires_at);

    let rotated = auth_service.refresh_token(&login.tokens.refresh_token).await?;
    println!("rotated refresh token");

    match auth_service.refresh_token(&login.tokens.refresh_token).await {
        Err(e) => println!("replaying the old refresh token fails as expected: {}", e),
        Ok(_) => unreachable!("rotation must be one-time-use"),
    }

    auth_service
        .forgot_password(ForgotPasswordRequest {
            email: "demo@example.com".to_string(),
        })
        .await?;

    auth_service.logout(&rotated.tokens.refresh_token).await?;
    println!("logged out");

    Ok(())
}
