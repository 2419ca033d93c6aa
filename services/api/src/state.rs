use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use movieapp_auth_types::identity::TokenSecret;

use crate::infra::db::{DbPublishedReviewRepository, DbUserRepository};
use crate::infra::tmdb::TmdbClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub token_secret: TokenSecret,
    pub token_ttl_secs: u64,
    pub catalog: TmdbClient,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbPublishedReviewRepository {
        DbPublishedReviewRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for TokenSecret {
    fn from_ref(state: &AppState) -> Self {
        state.token_secret.clone()
    }
}
