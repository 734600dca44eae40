//! Unit tests for token issuance, validation, and rotation

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenType};
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(MockTokenRepository::new(), TokenServiceConfig::default()).unwrap()
}

fn service_with_secret(secret: &str) -> TokenService<MockTokenRepository> {
    let config = TokenServiceConfig {
        jwt_secret: secret.to_string(),
        ..TokenServiceConfig::default()
    };
    TokenService::new(MockTokenRepository::new(), config).unwrap()
}

fn sample_user() -> User {
    User::new(
        "a@b.com".to_string(),
        "password1",
        "A".to_string(),
        "B".to_string(),
        String::new(),
        UserRole::Customer,
    )
    .unwrap()
}

#[test]
fn test_empty_secret_fails_construction() {
    let config = TokenServiceConfig {
        jwt_secret: String::new(),
        ..TokenServiceConfig::default()
    };
    let result = TokenService::new(MockTokenRepository::new(), config);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::SigningFailed))
    ));
}

#[test]
fn test_issue_and_validate_round_trip() {
    let service = service();
    let user_id = Uuid::new_v4();

    let pair = service
        .issue_token_pair(user_id, "a@b.com", UserRole::Admin)
        .unwrap();

    let access = service.validate_token(&pair.access_token).unwrap();
    assert_eq!(access.user_id().unwrap(), user_id);
    assert_eq!(access.email, "a@b.com");
    assert_eq!(access.role, UserRole::Admin);
    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(access.exp, pair.access_expires_at);

    let refresh = service.validate_token(&pair.refresh_token).unwrap();
    assert_eq!(refresh.user_id().unwrap(), user_id);
    assert_eq!(refresh.token_type, TokenType::Refresh);
    assert_eq!(refresh.exp, pair.refresh_expires_at);
}

#[test]
fn test_pair_tokens_are_distinct_and_expiries_ordered() {
    let service = service();
    let pair = service
        .issue_token_pair(Uuid::new_v4(), "a@b.com", UserRole::Customer)
        .unwrap();

    assert_ne!(pair.access_token, pair.refresh_token);
    assert!(pair.refresh_expires_at > pair.access_expires_at);
}

#[tokio::test]
async fn test_issuance_performs_no_io() {
    let service = service();
    let pair = service
        .issue_token_pair(Uuid::new_v4(), "a@b.com", UserRole::Customer)
        .unwrap();

    // nothing persisted until the caller asks for it
    assert!(!pair.refresh_token.is_empty());
    assert!(service.repository.is_empty().await);
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let issuer = service_with_secret("secret-one");
    let verifier = service_with_secret("secret-two");

    let pair = issuer
        .issue_token_pair(Uuid::new_v4(), "a@b.com", UserRole::Customer)
        .unwrap();

    let result = verifier.validate_token(&pair.access_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_garbage_token_rejected() {
    let service = service();
    let result = service.validate_token("not.a.jwt");
    assert!(matches!(result, Err(DomainError::Token(_))));
}

#[test]
fn test_expired_token_rejected() {
    let service = service();
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "a@b.com", UserRole::Customer);
    // beyond the default decode leeway
    claims.exp = (Utc::now() - Duration::minutes(10)).timestamp();
    claims.iat = (Utc::now() - Duration::hours(1)).timestamp();
    claims.nbf = claims.iat;
    let token = service.encode_jwt(&claims).unwrap();

    let result = service.validate_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_not_yet_valid_token_rejected() {
    let service = service();
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "a@b.com", UserRole::Customer);
    claims.nbf = (Utc::now() + Duration::minutes(10)).timestamp();
    claims.exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = service.encode_jwt(&claims).unwrap();

    let result = service.validate_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenNotYetValid))
    ));
}

#[test]
fn test_wrong_issuer_rejected() {
    let service = service();
    let mut claims = Claims::new_access_token(Uuid::new_v4(), "a@b.com", UserRole::Customer);
    claims.iss = "someone-else".to_string();
    let token = service.encode_jwt(&claims).unwrap();

    assert!(service.validate_token(&token).is_err());
}

#[tokio::test]
async fn test_persist_refresh_token_matches_claim_expiry() {
    let service = service();
    let user_id = Uuid::new_v4();
    let pair = service
        .issue_token_pair(user_id, "a@b.com", UserRole::Customer)
        .unwrap();

    let record = service.persist_refresh_token(user_id, &pair).await.unwrap();

    assert_eq!(record.user_id, user_id);
    assert_eq!(record.token, pair.refresh_token);
    assert_eq!(record.expires_at.timestamp(), pair.refresh_expires_at);

    let found = service
        .find_valid_refresh_token(&pair.refresh_token)
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, record.id);
}

#[tokio::test]
async fn test_rotation_issues_new_pair_and_revokes_old() {
    let service = service();
    let user = sample_user();
    let pair = service
        .issue_token_pair(user.id, &user.email, user.role)
        .unwrap();
    let record = service.persist_refresh_token(user.id, &pair).await.unwrap();

    let new_pair = service.rotate_refresh_token(&record, &user).await.unwrap();

    assert_ne!(new_pair.refresh_token, pair.refresh_token);
    assert!(service
        .find_valid_refresh_token(&pair.refresh_token)
        .await
        .unwrap()
        .is_none());
    assert!(service
        .find_valid_refresh_token(&new_pair.refresh_token)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_rotation_is_one_time_use() {
    let service = service();
    let user = sample_user();
    let pair = service
        .issue_token_pair(user.id, &user.email, user.role)
        .unwrap();
    let record = service.persist_refresh_token(user.id, &pair).await.unwrap();

    service.rotate_refresh_token(&record, &user).await.unwrap();
    let second = service.rotate_refresh_token(&record, &user).await;

    assert!(matches!(
        second,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_revoke_all_user_tokens() {
    let service = service();
    let user = sample_user();

    for _ in 0..3 {
        let pair = service
            .issue_token_pair(user.id, &user.email, user.role)
            .unwrap();
        service.persist_refresh_token(user.id, &pair).await.unwrap();
    }

    assert_eq!(service.revoke_all_user_tokens(user.id).await.unwrap(), 3);
    assert_eq!(service.revoke_all_user_tokens(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_revoked_record_fails_validity_lookup() {
    let service = service();
    let user = sample_user();
    let pair = service
        .issue_token_pair(user.id, &user.email, user.role)
        .unwrap();
    service.persist_refresh_token(user.id, &pair).await.unwrap();

    assert!(service
        .revoke_refresh_token(&pair.refresh_token)
        .await
        .unwrap());
    assert!(service
        .find_valid_refresh_token(&pair.refresh_token)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_expired_record_fails_validity_lookup() {
    let service = service();
    let user_id = Uuid::new_v4();
    let record = RefreshToken::with_expiry(
        user_id,
        "stale-token".to_string(),
        Utc::now() - Duration::hours(1),
    );
    service.repository.create(record).await.unwrap();

    assert!(service
        .find_valid_refresh_token("stale-token")
        .await
        .unwrap()
        .is_none());
}
