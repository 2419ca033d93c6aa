use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use movieapp_domain::collection::ListKind;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("movie already in {0}")]
    AlreadyInList(ListKind),
    #[error("you already reviewed this movie")]
    AlreadyReviewed,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    #[error("comment must be at most 1000 characters")]
    CommentTooLong,
    #[error("please add a valid email")]
    InvalidEmail,
    #[error("please add a name")]
    InvalidName,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("missing data")]
    MissingData,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("error fetching movie data")]
    Upstream(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::AlreadyInList(_) => "ALREADY_IN_LIST",
            Self::AlreadyReviewed => "ALREADY_REVIEWED",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidRating => "INVALID_RATING",
            Self::CommentTooLong => "COMMENT_TOO_LONG",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidName => "INVALID_NAME",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Upstream(_) => "UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::ReviewNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyInList(_) | Self::AlreadyReviewed | Self::EmailAlreadyRegistered => {
                StatusCode::CONFLICT
            }
            Self::InvalidRating
            | Self::CommentTooLong
            | Self::InvalidEmail
            | Self::InvalidName
            | Self::PasswordTooShort
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected request body");
        Self::MissingData
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Only 5xx are logged here; TraceLayer records every request's status.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::Upstream(e) => tracing::warn!(error = ?e, kind = "UPSTREAM", "upstream error"),
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
