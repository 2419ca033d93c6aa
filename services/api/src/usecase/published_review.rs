use chrono::Utc;
use uuid::Uuid;

use movieapp_domain::pagination::PageRequest;
use movieapp_domain::rating::Rating;

use crate::domain::repository::PublishedReviewRepository;
use crate::domain::types::{MAX_COMMENT_LEN, PublishedReview};
use crate::error::ApiError;

// ── PublishReview (create or update) ─────────────────────────────────────────

pub struct PublishReviewInput {
    pub movie_id: i32,
    pub movie_title: String,
    pub movie_poster: Option<String>,
    pub rating: i64,
    pub comment: String,
    /// `None` keeps the current visibility, or public for a new review.
    pub is_public: Option<bool>,
}

pub struct PublishReviewOutput {
    pub review: PublishedReview,
    pub created: bool,
}

pub struct PublishReviewUseCase<R: PublishedReviewRepository> {
    pub repo: R,
}

impl<R: PublishedReviewRepository> PublishReviewUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: PublishReviewInput,
    ) -> Result<PublishReviewOutput, ApiError> {
        let rating = Rating::try_from(input.rating).map_err(|_| ApiError::InvalidRating)?;
        let movie_title = input.movie_title.trim().to_owned();
        let comment = input.comment.trim().to_owned();
        if movie_title.is_empty() || comment.is_empty() {
            return Err(ApiError::MissingData);
        }
        if comment.chars().count() > MAX_COMMENT_LEN {
            return Err(ApiError::CommentTooLong);
        }
        let movie_poster = input.movie_poster.filter(|p| !p.trim().is_empty());
        let now = Utc::now();

        if let Some(mut review) = self
            .repo
            .find_by_user_and_movie(user_id, input.movie_id)
            .await?
        {
            review.movie_title = movie_title;
            review.movie_poster = movie_poster;
            review.rating = rating;
            review.comment = comment;
            review.is_public = input.is_public.unwrap_or(review.is_public);
            review.updated_at = now;
            self.repo.update(&review).await?;
            return Ok(PublishReviewOutput {
                review,
                created: false,
            });
        }

        let review = PublishedReview {
            id: Uuid::now_v7(),
            user_id,
            movie_id: input.movie_id,
            movie_title,
            movie_poster,
            rating,
            comment,
            liked_by: Vec::new(),
            is_public: input.is_public.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&review).await?;
        Ok(PublishReviewOutput {
            review,
            created: true,
        })
    }
}

// ── GetMovieReviews ──────────────────────────────────────────────────────────

pub struct GetMovieReviewsUseCase<R: PublishedReviewRepository> {
    pub repo: R,
}

impl<R: PublishedReviewRepository> GetMovieReviewsUseCase<R> {
    pub async fn execute(
        &self,
        movie_id: i32,
        page: PageRequest,
    ) -> Result<Vec<PublishedReview>, ApiError> {
        self.repo
            .list_public_by_movie(movie_id, page.clamped())
            .await
    }
}

// ── Like / Unlike ────────────────────────────────────────────────────────────

pub struct SetReviewLikeUseCase<R: PublishedReviewRepository> {
    pub repo: R,
}

impl<R: PublishedReviewRepository> SetReviewLikeUseCase<R> {
    /// Idempotent: liking twice or unliking a review never liked is a no-op.
    pub async fn execute(
        &self,
        user_id: Uuid,
        review_id: Uuid,
        liked: bool,
    ) -> Result<PublishedReview, ApiError> {
        let mut review = self
            .repo
            .find_by_id(review_id)
            .await?
            .filter(|r| r.visible_to(user_id))
            .ok_or(ApiError::ReviewNotFound)?;

        let already = review.liked_by.contains(&user_id);
        match (liked, already) {
            (true, false) => review.liked_by.push(user_id),
            (false, true) => review.liked_by.retain(|id| *id != user_id),
            _ => return Ok(review),
        }
        self.repo.set_liked_by(review.id, &review.liked_by).await?;
        Ok(review)
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<R: PublishedReviewRepository> {
    pub repo: R,
}

impl<R: PublishedReviewRepository> DeleteReviewUseCase<R> {
    /// Someone else's review reads as missing.
    pub async fn execute(&self, user_id: Uuid, review_id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(review_id, user_id).await? {
            return Err(ApiError::ReviewNotFound);
        }
        Ok(())
    }
}
