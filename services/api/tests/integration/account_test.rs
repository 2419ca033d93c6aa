use movieapp_api::error::ApiError;
use movieapp_api::usecase::account::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase, RegisterInput,
    RegisterUseCase, Session,
};
use movieapp_api::usecase::credential::{hash_password, verify_password};
use movieapp_auth_types::identity::TokenSecret;
use movieapp_auth_types::token::validate_access_token;
use movieapp_testing::auth::TEST_JWT_SECRET;

use crate::helpers::MemUserRepo;

async fn register(repo: &MemUserRepo, email: &str, password: &str) -> Result<Session, ApiError> {
    RegisterUseCase {
        repo: repo.clone(),
        token_secret: TokenSecret::new(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
    }
    .execute(RegisterInput {
        name: "Alice".into(),
        email: email.into(),
        password: password.into(),
    })
    .await
}

async fn login(repo: &MemUserRepo, email: &str, password: &str) -> Result<Session, ApiError> {
    LoginUseCase {
        repo: repo.clone(),
        token_secret: TokenSecret::new(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
    }
    .execute(LoginInput {
        email: email.into(),
        password: password.into(),
    })
    .await
}

// ── Password hashing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_never_store_plaintext_password() {
    for p in ["secret1", "correct horse battery staple", "пароль123"] {
        let hash = hash_password(p).await.unwrap();
        assert_ne!(hash, p);
        assert!(verify_password(p, &hash).await.unwrap());
        let other = hash_password(&format!("{p}x")).await.unwrap();
        assert!(!verify_password(p, &other).await.unwrap());
    }
}

// ── Register / Login ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_then_login_with_same_credentials() {
    let repo = MemUserRepo::default();
    let registered = register(&repo, "Alice@Example.com", "secret1").await.unwrap();

    let info = validate_access_token(&registered.token.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, registered.user.id);

    let stored = repo.get(registered.user.id).unwrap();
    assert_eq!(stored.email, "alice@example.com");
    assert_ne!(stored.password_hash, "secret1");

    let session = login(&repo, "alice@example.com", "secret1").await.unwrap();
    assert_eq!(session.user, registered.user);
}

#[tokio::test]
async fn should_reject_second_registration_for_same_email() {
    let repo = MemUserRepo::default();
    register(&repo, "alice@example.com", "secret1").await.unwrap();
    let result = register(&repo, "ALICE@example.com", "secret2").await;
    assert!(matches!(result, Err(ApiError::EmailAlreadyRegistered)));
}

#[tokio::test]
async fn should_fail_login_identically_for_unknown_email_and_wrong_password() {
    let repo = MemUserRepo::default();
    register(&repo, "alice@example.com", "secret1").await.unwrap();

    let wrong_password = login(&repo, "alice@example.com", "secret2").await;
    assert!(matches!(wrong_password, Err(ApiError::InvalidCredentials)));

    let unknown = login(&repo, "nobody@example.com", "secret1").await;
    assert!(matches!(unknown, Err(ApiError::InvalidCredentials)));
}

// ── ChangePassword ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_change_password_and_retire_old_one() {
    let repo = MemUserRepo::default();
    let session = register(&repo, "alice@example.com", "secret1").await.unwrap();

    ChangePasswordUseCase { repo: repo.clone() }
        .execute(
            session.user.id,
            ChangePasswordInput {
                current_password: "secret1".into(),
                new_password: "secret2".into(),
            },
        )
        .await
        .unwrap();

    let old = login(&repo, "alice@example.com", "secret1").await;
    assert!(matches!(old, Err(ApiError::InvalidCredentials)));
    login(&repo, "alice@example.com", "secret2").await.unwrap();
}

#[tokio::test]
async fn should_require_current_password_to_change_it() {
    let repo = MemUserRepo::default();
    let session = register(&repo, "alice@example.com", "secret1").await.unwrap();
    let before = repo.get(session.user.id).unwrap().password_hash;

    let wrong = ChangePasswordUseCase { repo: repo.clone() }
        .execute(
            session.user.id,
            ChangePasswordInput {
                current_password: "guess".into(),
                new_password: "secret2".into(),
            },
        )
        .await;
    assert!(matches!(wrong, Err(ApiError::InvalidCredentials)));

    let short = ChangePasswordUseCase { repo: repo.clone() }
        .execute(
            session.user.id,
            ChangePasswordInput {
                current_password: "secret1".into(),
                new_password: "123".into(),
            },
        )
        .await;
    assert!(matches!(short, Err(ApiError::PasswordTooShort)));

    assert_eq!(repo.get(session.user.id).unwrap().password_hash, before);
}
