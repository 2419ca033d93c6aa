//! Mock auth helpers for router tests.
//!
//! Protected routes expect `Authorization: Bearer <jwt>`. `MockAuth` signs a
//! real token with a test secret so requests pass the `Identity` extractor
//! without going through registration or login.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use movieapp_auth_types::token::issue_access_token;

/// Secret shared by test routers and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity to present on test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    /// Sign with a different secret, e.g. to exercise rejection paths.
    pub fn with_secret(user_id: Uuid, secret: &str) -> Self {
        Self {
            user_id,
            secret: secret.to_owned(),
        }
    }

    /// `Bearer <token>` value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        let issued = issue_access_token(self.user_id, &self.secret, 3600)
            .expect("sign test token");
        format!("Bearer {}", issued.token)
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.bearer()).expect("valid header value"),
        );
        map
    }
}
