use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use movieapp_api::domain::repository::{PublishedReviewRepository, UserRepository};
use movieapp_api::domain::types::{MovieEntry, PublishedReview, ReviewEntry, User};
use movieapp_api::error::ApiError;
use movieapp_api::infra::tmdb::TmdbClient;
use movieapp_api::state::AppState;
use movieapp_auth_types::identity::TokenSecret;
use movieapp_domain::collection::ListKind;
use movieapp_domain::pagination::PageRequest;
use movieapp_domain::user::DEFAULT_AVATAR;
use movieapp_testing::auth::TEST_JWT_SECRET;

pub const TEST_FRONTEND_URL: &str = "http://localhost:3000";

// ── MemUserRepo ──────────────────────────────────────────────────────────────

/// In-memory user store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemUserRepo {
    pub users: Arc<Mutex<HashMap<Uuid, User>>>,
    /// Number of writes performed, across all mutating methods.
    pub writes: Arc<Mutex<u32>>,
}

impl MemUserRepo {
    pub fn with_user(user: User) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().insert(user.id, user);
        repo
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn write_count(&self) -> u32 {
        *self.writes.lock().unwrap()
    }

    fn modify(&self, id: Uuid, f: impl FnOnce(&mut User)) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or(ApiError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

impl UserRepository for MemUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(ApiError::EmailAlreadyRegistered);
        }
        users.insert(user.id, user.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<(), ApiError> {
        self.modify(id, |u| {
            if let Some(name) = name {
                u.name = name.to_owned();
            }
            if let Some(email) = email {
                u.email = email.to_owned();
            }
            if let Some(avatar) = avatar {
                u.avatar = avatar.to_owned();
            }
        })
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        self.modify(id, |u| u.password_hash = password_hash.to_owned())
    }

    async fn save_list(
        &self,
        id: Uuid,
        kind: ListKind,
        entries: &[MovieEntry],
    ) -> Result<(), ApiError> {
        self.modify(id, |u| match kind {
            ListKind::Watchlist => u.watchlist = entries.to_vec(),
            ListKind::Favorites => u.favorites = entries.to_vec(),
        })
    }

    async fn save_reviews(&self, id: Uuid, reviews: &[ReviewEntry]) -> Result<(), ApiError> {
        self.modify(id, |u| u.reviews = reviews.to_vec())
    }
}

// ── StaleReadUserRepo ────────────────────────────────────────────────────────

/// Serves every read from a snapshot taken up front while writes go to the
/// shared store, reproducing two requests that both read before either writes.
pub struct StaleReadUserRepo {
    pub snapshot: User,
    pub store: MemUserRepo,
}

impl UserRepository for StaleReadUserRepo {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(Some(self.snapshot.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        self.store.find_by_email(email).await
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.store.create(user).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<(), ApiError> {
        self.store.update_profile(id, name, email, avatar).await
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        self.store.update_password_hash(id, password_hash).await
    }

    async fn save_list(
        &self,
        id: Uuid,
        kind: ListKind,
        entries: &[MovieEntry],
    ) -> Result<(), ApiError> {
        self.store.save_list(id, kind, entries).await
    }

    async fn save_reviews(&self, id: Uuid, reviews: &[ReviewEntry]) -> Result<(), ApiError> {
        self.store.save_reviews(id, reviews).await
    }
}

// ── MemReviewRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemReviewRepo {
    pub reviews: Arc<Mutex<Vec<PublishedReview>>>,
}

impl MemReviewRepo {
    pub fn all(&self) -> Vec<PublishedReview> {
        self.reviews.lock().unwrap().clone()
    }
}

impl PublishedReviewRepository for MemReviewRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PublishedReview>, ApiError> {
        Ok(self.all().into_iter().find(|r| r.id == id))
    }

    async fn find_by_user_and_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
    ) -> Result<Option<PublishedReview>, ApiError> {
        Ok(self
            .all()
            .into_iter()
            .find(|r| r.user_id == user_id && r.movie_id == movie_id))
    }

    async fn create(&self, review: &PublishedReview) -> Result<(), ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.user_id == review.user_id && r.movie_id == review.movie_id)
        {
            return Err(ApiError::AlreadyReviewed);
        }
        reviews.push(review.clone());
        Ok(())
    }

    async fn update(&self, review: &PublishedReview) -> Result<(), ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        let slot = reviews
            .iter_mut()
            .find(|r| r.id == review.id)
            .ok_or(ApiError::ReviewNotFound)?;
        *slot = PublishedReview {
            liked_by: slot.liked_by.clone(),
            created_at: slot.created_at,
            ..review.clone()
        };
        Ok(())
    }

    async fn list_public_by_movie(
        &self,
        movie_id: i32,
        page: PageRequest,
    ) -> Result<Vec<PublishedReview>, ApiError> {
        let page = page.clamped();
        let mut matching: Vec<_> = self
            .all()
            .into_iter()
            .filter(|r| r.movie_id == movie_id && r.is_public)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }

    async fn set_liked_by(&self, id: Uuid, liked_by: &[Uuid]) -> Result<(), ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        let slot = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ApiError::ReviewNotFound)?;
        slot.liked_by = liked_by.to_vec();
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(reviews.len() < before)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: "alice".into(),
        email: "alice@example.com".into(),
        password_hash: "$2b$10$not-a-real-hash".into(),
        avatar: DEFAULT_AVATAR.into(),
        watchlist: vec![],
        favorites: vec![],
        reviews: vec![],
        created_at: now,
        updated_at: now,
    }
}

/// Router state with no database behind it. Requests that reach the
/// repositories fail as internal errors.
pub fn disconnected_state(catalog_base_url: &str) -> AppState {
    AppState {
        db: DatabaseConnection::Disconnected,
        token_secret: TokenSecret::new(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
        catalog: TmdbClient::new(catalog_base_url, "test-api-key").unwrap(),
    }
}
