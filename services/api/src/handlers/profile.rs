use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use movieapp_auth_types::identity::Identity;

use crate::domain::types::PublicUser;
use crate::error::ApiError;
use crate::handlers::extract::AppJson;
use crate::state::AppState;
use crate::usecase::account::{
    ChangePasswordInput, ChangePasswordUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

/// Public projection of a user. Never carries the password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl From<PublicUser> for UserResponse {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            avatar: user.avatar,
        }
    }
}

// ── PUT /api/users/profile ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                name: body.name,
                email: body.email,
                avatar: body.avatar,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── PUT /api/users/password ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = ChangePasswordUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
