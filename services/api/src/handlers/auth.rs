use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use movieapp_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::handlers::extract::AppJson;
use crate::handlers::profile::UserResponse;
use crate::state::AppState;
use crate::usecase::account::{
    GetUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, Session,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    /// Seconds since UNIX epoch.
    pub expires_at: u64,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.into(),
            token: session.token.token,
            expires_at: session.token.expires_at,
        }
    }
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        token_secret: state.token_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let session = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        token_secret: state.token_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let session = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(session.into()))
}

// ── GET /api/auth/me ─────────────────────────────────────────────────────────

pub async fn me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}
