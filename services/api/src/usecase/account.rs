use chrono::Utc;
use uuid::Uuid;

use movieapp_auth_types::identity::TokenSecret;
use movieapp_auth_types::token::{IssuedToken, issue_access_token};
use movieapp_domain::user::{
    DEFAULT_AVATAR, MIN_PASSWORD_LEN, is_valid_email, normalize_email, normalize_name,
};

use crate::domain::repository::UserRepository;
use crate::domain::types::{PublicUser, User};
use crate::error::ApiError;
use crate::usecase::credential::{hash_password, verify_password};

/// A signed-in user: public projection plus a fresh bearer token.
#[derive(Debug)]
pub struct Session {
    pub user: PublicUser,
    pub token: IssuedToken,
}

fn check_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::PasswordTooShort);
    }
    Ok(())
}

fn open_session(
    user: PublicUser,
    secret: &TokenSecret,
    ttl_secs: u64,
) -> Result<Session, ApiError> {
    let token = issue_access_token(user.id, secret.as_str(), ttl_secs)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("issue access token")))?;
    Ok(Session { user, token })
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
    pub token_secret: TokenSecret,
    pub token_ttl_secs: u64,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<Session, ApiError> {
        let name = normalize_name(&input.name).ok_or(ApiError::InvalidName)?;
        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(ApiError::InvalidEmail);
        }
        check_password_len(&input.password)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailAlreadyRegistered);
        }

        // The record only ever sees the hash.
        let password_hash = hash_password(&input.password).await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash,
            avatar: DEFAULT_AVATAR.to_owned(),
            watchlist: Vec::new(),
            favorites: Vec::new(),
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");

        open_session(user.profile(), &self.token_secret, self.token_ttl_secs)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub token_secret: TokenSecret,
    pub token_ttl_secs: u64,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<Session, ApiError> {
        let email = normalize_email(&input.email);
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }
        open_session(user.profile(), &self.token_secret, self.token_ttl_secs)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<PublicUser, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .map(|u| u.profile())
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Blank or omitted fields mean "keep the current value".
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<PublicUser, ApiError> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let name = input.name.as_deref().and_then(normalize_name);
        let email = match input.email.as_deref().map(normalize_email) {
            Some(e) if e.is_empty() => None,
            Some(e) if !is_valid_email(&e) => return Err(ApiError::InvalidEmail),
            other => other,
        };
        let avatar = input
            .avatar
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());

        if let Some(email) = email.as_deref().filter(|e| *e != user.email) {
            if self.repo.find_by_email(email).await?.is_some() {
                return Err(ApiError::EmailAlreadyRegistered);
            }
        }

        self.repo
            .update_profile(user_id, name.as_deref(), email.as_deref(), avatar.as_deref())
            .await?;

        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(avatar) = avatar {
            user.avatar = avatar;
        }
        Ok(user.profile())
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ChangePasswordUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, input: ChangePasswordInput) -> Result<(), ApiError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !verify_password(&input.current_password, &user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }
        check_password_len(&input.new_password)?;

        let password_hash = hash_password(&input.new_password).await?;
        self.repo.update_password_hash(user_id, &password_hash).await
    }
}
