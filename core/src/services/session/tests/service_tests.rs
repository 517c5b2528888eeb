//! Unit tests for session resolution and sign-in provisioning

use std::sync::Arc;

use crate::domain::entities::user::{User, MAX_USERNAME_LEN};
use crate::domain::value_objects::identity::{Session, VerifiedProfile};
use crate::errors::DomainError;
use crate::repositories::MockUserRepository;
use crate::services::session::{SessionService, SessionServiceConfig};

fn service() -> SessionService<MockUserRepository> {
    SessionService::new(
        Arc::new(MockUserRepository::new()),
        SessionServiceConfig::default(),
    )
}

fn service_with_repo(repo: Arc<MockUserRepository>) -> SessionService<MockUserRepository> {
    SessionService::new(repo, SessionServiceConfig::default())
}

fn profile(email: &str, name: &str) -> VerifiedProfile {
    VerifiedProfile {
        email: email.to_string(),
        name: name.to_string(),
        picture: Some("https://avatars.example/1.png".to_string()),
    }
}

#[tokio::test]
async fn test_resolve_without_session_is_unauthenticated() {
    let result = service().resolve(None).await;
    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn test_resolve_fails_when_user_row_is_gone() {
    let repo = Arc::new(MockUserRepository::new());
    let service = service_with_repo(repo);

    let session = Session {
        user_id: uuid::Uuid::new_v4(),
        email: "ghost@example.com".to_string(),
    };
    let result = service.resolve(Some(&session)).await;
    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn test_resolve_returns_identity_of_stored_user() {
    let repo = Arc::new(MockUserRepository::new());
    let user = User::new("ana@example.com".to_string(), "Ana".to_string(), None);
    repo.insert(user.clone()).await;
    let service = service_with_repo(repo);

    let session = Session {
        user_id: user.id,
        email: user.email.clone(),
    };
    let identity = service.resolve(Some(&session)).await.unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.email, "ana@example.com");
    assert_eq!(identity.username, "Ana");
}

#[tokio::test]
async fn test_resolve_performs_no_writes() {
    let repo = Arc::new(MockUserRepository::new());
    let service = service_with_repo(repo.clone());

    let session = Session {
        user_id: uuid::Uuid::new_v4(),
        email: "nobody@example.com".to_string(),
    };
    let _ = service.resolve(Some(&session)).await;
    assert_eq!(repo.len().await, 0);
}

#[tokio::test]
async fn test_establish_provisions_user_once() {
    let repo = Arc::new(MockUserRepository::new());
    let service = service_with_repo(repo.clone());

    let first = service.establish(profile("kay@example.com", "Kay")).await.unwrap();
    assert_eq!(repo.len().await, 1);
    assert_eq!(first.user.username, "Kay");
    assert_eq!(
        first.user.image_url.as_deref(),
        Some("https://avatars.example/1.png")
    );

    // Second sign-in with the same email reuses the stored row
    let second = service.establish(profile("kay@example.com", "Kay Again")).await.unwrap();
    assert_eq!(repo.len().await, 1);
    assert_eq!(second.user.id, first.user.id);
    assert_eq!(second.user.username, "Kay");
}

#[tokio::test]
async fn test_establish_truncates_long_profile_names() {
    let repo = Arc::new(MockUserRepository::new());
    let service = service_with_repo(repo);

    let long_name = "x".repeat(MAX_USERNAME_LEN + 40);
    let sign_in = service.establish(profile("long@example.com", &long_name)).await.unwrap();
    assert_eq!(sign_in.user.username.chars().count(), MAX_USERNAME_LEN);
}

#[tokio::test]
async fn test_issued_token_verifies_back_to_session() {
    let repo = Arc::new(MockUserRepository::new());
    let service = service_with_repo(repo);

    let sign_in = service.establish(profile("round@example.com", "Round")).await.unwrap();
    assert_eq!(sign_in.expires_in, 60 * 60 * 24 * 30);

    let session = service.verify_token(&sign_in.token).unwrap();
    assert_eq!(session.user_id, sign_in.user.id);
    assert_eq!(session.email, "round@example.com");
}

#[tokio::test]
async fn test_verified_session_resolves_to_the_signed_in_user() {
    let repo = Arc::new(MockUserRepository::new());
    let service = service_with_repo(repo);

    let sign_in = service.establish(profile("loop@example.com", "Loop")).await.unwrap();
    let session = service.verify_token(&sign_in.token).unwrap();
    let identity = service.resolve(Some(&session)).await.unwrap();
    assert_eq!(identity.user_id, sign_in.user.id);
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let result = service().verify_token("not-a-token");
    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let repo = Arc::new(MockUserRepository::new());
    let other = SessionService::new(
        repo.clone(),
        SessionServiceConfig {
            jwt_secret: "someone-elses-secret".to_string(),
            ..Default::default()
        },
    );
    let user = User::new("eva@example.com".to_string(), "Eva".to_string(), None);
    let foreign_token = other.issue_token(&user).unwrap();

    let result = service_with_repo(repo).verify_token(&foreign_token);
    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let repo = Arc::new(MockUserRepository::new());
    let service = SessionService::new(
        repo,
        SessionServiceConfig {
            // Expired ten minutes ago, well past the default leeway
            token_ttl_minutes: -10,
            ..Default::default()
        },
    );

    let user = User::new("late@example.com".to_string(), "Late".to_string(), None);
    let token = service.issue_token(&user).unwrap();
    let result = service.verify_token(&token);
    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}
