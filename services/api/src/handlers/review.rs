use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use movieapp_auth_types::identity::Identity;
use movieapp_domain::pagination::PageRequest;

use crate::domain::types::PublishedReview;
use crate::error::ApiError;
use crate::handlers::extract::AppJson;
use crate::state::AppState;
use crate::usecase::published_review::{
    DeleteReviewUseCase, GetMovieReviewsUseCase, PublishReviewInput, PublishReviewUseCase,
    SetReviewLikeUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub user_id: String,
    pub movie_id: i32,
    pub movie_title: String,
    pub movie_poster: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub liked_by: Vec<String>,
    pub likes: usize,
    pub is_public: bool,
    #[serde(serialize_with = "movieapp_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "movieapp_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PublishedReview> for ReviewResponse {
    fn from(r: PublishedReview) -> Self {
        Self {
            id: r.id.to_string(),
            user_id: r.user_id.to_string(),
            movie_id: r.movie_id,
            movie_title: r.movie_title,
            movie_poster: r.movie_poster,
            rating: r.rating.get(),
            comment: r.comment,
            likes: r.liked_by.len(),
            liked_by: r.liked_by.iter().map(Uuid::to_string).collect(),
            is_public: r.is_public,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ── POST /api/reviews ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReviewRequest {
    pub movie_id: i32,
    pub movie_title: String,
    pub movie_poster: Option<String>,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    pub is_public: Option<bool>,
}

pub async fn publish_review(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<PublishReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = PublishReviewUseCase {
        repo: state.review_repo(),
    };
    let output = usecase
        .execute(
            identity.user_id,
            PublishReviewInput {
                movie_id: body.movie_id,
                movie_title: body.movie_title,
                movie_poster: body.movie_poster,
                rating: body.rating,
                comment: body.comment,
                is_public: body.is_public,
            },
        )
        .await?;
    let status = if output.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(output.review.into())))
}

// ── GET /api/reviews/movie/{movieId} ─────────────────────────────────────────

pub async fn get_movie_reviews(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let usecase = GetMovieReviewsUseCase {
        repo: state.review_repo(),
    };
    let reviews = usecase.execute(movie_id, page).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

// ── POST|DELETE /api/reviews/{id}/like ───────────────────────────────────────

async fn set_like(
    state: AppState,
    identity: Identity,
    review_id: Uuid,
    liked: bool,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = SetReviewLikeUseCase {
        repo: state.review_repo(),
    };
    let review = usecase.execute(identity.user_id, review_id, liked).await?;
    Ok(Json(review.into()))
}

pub async fn like_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ReviewResponse>, ApiError> {
    set_like(state, identity, review_id, true).await
}

pub async fn unlike_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ReviewResponse>, ApiError> {
    set_like(state, identity, review_id, false).await
}

// ── DELETE /api/reviews/{id} ─────────────────────────────────────────────────

pub async fn delete_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteReviewUseCase {
        repo: state.review_repo(),
    };
    usecase.execute(identity.user_id, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
