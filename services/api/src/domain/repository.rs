#![allow(async_fn_in_trait)]

use serde_json::Value;
use uuid::Uuid;

use movieapp_domain::collection::ListKind;
use movieapp_domain::pagination::PageRequest;

use crate::domain::types::{MovieEntry, MovieListing, PublishedReview, ReviewEntry, User};
use crate::error::ApiError;

/// Repository for user records and their embedded collections.
///
/// Every mutating method is a single write. Collections are replaced whole,
/// so callers doing read-modify-write race with each other (last write wins).
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    /// Fails with `EmailAlreadyRegistered` when the email is taken.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    /// Fails with `UserNotFound` when no row matches.
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<(), ApiError>;
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;
    async fn save_list(
        &self,
        id: Uuid,
        kind: ListKind,
        entries: &[MovieEntry],
    ) -> Result<(), ApiError>;
    async fn save_reviews(&self, id: Uuid, reviews: &[ReviewEntry]) -> Result<(), ApiError>;
}

/// Repository for standalone (published) reviews.
pub trait PublishedReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PublishedReview>, ApiError>;
    async fn find_by_user_and_movie(
        &self,
        user_id: Uuid,
        movie_id: i32,
    ) -> Result<Option<PublishedReview>, ApiError>;
    async fn create(&self, review: &PublishedReview) -> Result<(), ApiError>;
    /// Overwrites rating, comment, poster, title, visibility and `updated_at`.
    async fn update(&self, review: &PublishedReview) -> Result<(), ApiError>;
    /// Public reviews for a movie, newest first.
    async fn list_public_by_movie(
        &self,
        movie_id: i32,
        page: PageRequest,
    ) -> Result<Vec<PublishedReview>, ApiError>;
    async fn set_liked_by(&self, id: Uuid, liked_by: &[Uuid]) -> Result<(), ApiError>;
    /// Delete a review owned by `user_id`. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
}

/// Read-only port to the movie metadata provider. Payloads pass through untouched.
pub trait MovieCatalogPort: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<Value, ApiError>;
    async fn details(&self, movie_id: i32) -> Result<Value, ApiError>;
    async fn listing(&self, listing: MovieListing, page: u32) -> Result<Value, ApiError>;
    async fn genres(&self) -> Result<Value, ApiError>;
    async fn by_genre(&self, genre_id: i32, page: u32) -> Result<Value, ApiError>;
}
