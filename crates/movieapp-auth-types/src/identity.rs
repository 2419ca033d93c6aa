//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use uuid::Uuid;

use crate::token::validate_access_token;

/// HMAC secret used to verify bearer tokens. Expose it from the router state
/// with `FromRef` so that [`Identity`] can be extracted.
#[derive(Clone)]
pub struct TokenSecret(Arc<str>);

impl TokenSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSecret(..)")
    }
}

/// Authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// Handlers that take an `Identity` never run for unauthenticated requests:
/// the request is rejected with 401 during extraction.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Why a request was refused by the auth gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingToken,
    InvalidToken,
}

impl AuthRejection {
    pub fn kind(self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::MissingToken => "not authorized, no token",
            Self::InvalidToken => "not authorized, token failed",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.message(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Returns the token of a `Bearer` authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenSecret: FromRef<S>,
{
    type Rejection = AuthRejection;

    // Header and secret are read synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let token = bearer_token(&parts.headers).map(str::to_owned);

        async move {
            let token = token.ok_or(AuthRejection::MissingToken)?;
            let info = validate_access_token(&token, secret.as_str()).map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AuthRejection::InvalidToken
            })?;
            Ok(Self {
                user_id: info.user_id,
            })
        }
    }
}
