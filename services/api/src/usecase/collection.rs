//! Watchlist, favorites and embedded reviews.
//!
//! Each mutation loads the user, decides eligibility from that snapshot and
//! persists the whole sub-collection in one write. There is no version check,
//! so two concurrent mutations of the same user race and the later write wins.

use chrono::Utc;
use uuid::Uuid;

use movieapp_domain::collection::ListKind;
use movieapp_domain::rating::Rating;

use crate::domain::repository::UserRepository;
use crate::domain::types::{MovieEntry, ReviewEntry, User};
use crate::error::ApiError;

async fn load_user<R: UserRepository>(repo: &R, user_id: Uuid) -> Result<User, ApiError> {
    repo.find_by_id(user_id)
        .await?
        .ok_or(ApiError::UserNotFound)
}

fn list_of(user: User, kind: ListKind) -> Vec<MovieEntry> {
    match kind {
        ListKind::Watchlist => user.watchlist,
        ListKind::Favorites => user.favorites,
    }
}

// ── GetList ──────────────────────────────────────────────────────────────────

pub struct GetListUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetListUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, kind: ListKind) -> Result<Vec<MovieEntry>, ApiError> {
        let user = load_user(&self.repo, user_id).await?;
        Ok(list_of(user, kind))
    }
}

// ── AddToList ────────────────────────────────────────────────────────────────

pub struct AddToListInput {
    pub movie_id: i32,
    pub title: String,
    pub poster: Option<String>,
}

pub struct AddToListUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AddToListUseCase<R> {
    /// Returns the full updated list.
    pub async fn execute(
        &self,
        user_id: Uuid,
        kind: ListKind,
        input: AddToListInput,
    ) -> Result<Vec<MovieEntry>, ApiError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ApiError::MissingData);
        }

        let user = load_user(&self.repo, user_id).await?;
        let mut entries = list_of(user, kind);
        if entries.iter().any(|e| e.movie_id == input.movie_id) {
            return Err(ApiError::AlreadyInList(kind));
        }

        entries.push(MovieEntry {
            movie_id: input.movie_id,
            title: title.to_owned(),
            poster: input.poster.filter(|p| !p.trim().is_empty()),
            added_at: Utc::now(),
        });
        self.repo.save_list(user_id, kind, &entries).await?;
        Ok(entries)
    }
}

// ── RemoveFromList ───────────────────────────────────────────────────────────

pub struct RemoveFromListUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RemoveFromListUseCase<R> {
    /// Removing a movie that is not in the list is not an error.
    pub async fn execute(
        &self,
        user_id: Uuid,
        kind: ListKind,
        movie_id: i32,
    ) -> Result<Vec<MovieEntry>, ApiError> {
        let user = load_user(&self.repo, user_id).await?;
        let mut entries = list_of(user, kind);
        entries.retain(|e| e.movie_id != movie_id);
        self.repo.save_list(user_id, kind, &entries).await?;
        Ok(entries)
    }
}

// ── GetReviews ───────────────────────────────────────────────────────────────

pub struct GetReviewsUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetReviewsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ReviewEntry>, ApiError> {
        Ok(load_user(&self.repo, user_id).await?.reviews)
    }
}

// ── AddReview ────────────────────────────────────────────────────────────────

pub struct AddReviewInput {
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: i64,
    pub comment: String,
}

pub struct AddReviewUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AddReviewUseCase<R> {
    /// Returns the full updated review list.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: AddReviewInput,
    ) -> Result<Vec<ReviewEntry>, ApiError> {
        let rating = Rating::try_from(input.rating).map_err(|_| ApiError::InvalidRating)?;
        let movie_title = input.movie_title.trim();
        let comment = input.comment.trim();
        if movie_title.is_empty() || comment.is_empty() {
            return Err(ApiError::MissingData);
        }

        let mut reviews = load_user(&self.repo, user_id).await?.reviews;
        if reviews.iter().any(|r| r.movie_id == input.movie_id) {
            return Err(ApiError::AlreadyReviewed);
        }

        reviews.push(ReviewEntry {
            movie_id: input.movie_id,
            movie_title: movie_title.to_owned(),
            rating,
            comment: comment.to_owned(),
            created_at: Utc::now(),
        });
        self.repo.save_reviews(user_id, &reviews).await?;
        Ok(reviews)
    }
}
