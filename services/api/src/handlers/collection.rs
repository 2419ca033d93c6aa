use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use movieapp_auth_types::identity::Identity;
use movieapp_domain::collection::ListKind;

use crate::domain::types::{MovieEntry, ReviewEntry};
use crate::error::ApiError;
use crate::handlers::extract::AppJson;
use crate::state::AppState;
use crate::usecase::collection::{
    AddReviewInput, AddReviewUseCase, AddToListInput, AddToListUseCase, GetListUseCase,
    GetReviewsUseCase, RemoveFromListUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEntryResponse {
    pub movie_id: i32,
    pub title: String,
    pub poster: Option<String>,
    #[serde(serialize_with = "movieapp_core::serde::to_rfc3339_ms")]
    pub added_at: chrono::DateTime<chrono::Utc>,
}

impl From<MovieEntry> for MovieEntryResponse {
    fn from(e: MovieEntry) -> Self {
        Self {
            movie_id: e.movie_id,
            title: e.title,
            poster: e.poster,
            added_at: e.added_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntryResponse {
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: u8,
    pub comment: String,
    #[serde(serialize_with = "movieapp_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReviewEntry> for ReviewEntryResponse {
    fn from(r: ReviewEntry) -> Self {
        Self {
            movie_id: r.movie_id,
            movie_title: r.movie_title,
            rating: r.rating.get(),
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

/// The updated list keyed by its kind: `{"watchlist": [...]}` or `{"favorites": [...]}`.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListBody {
    Watchlist(Vec<MovieEntryResponse>),
    Favorites(Vec<MovieEntryResponse>),
}

#[derive(Serialize)]
pub struct ListMutationResponse {
    pub message: String,
    #[serde(flatten)]
    pub list: ListBody,
}

impl ListMutationResponse {
    fn new(kind: ListKind, verb: &str, entries: Vec<MovieEntry>) -> Self {
        let entries = entries.into_iter().map(Into::into).collect();
        let (message, list) = match kind {
            ListKind::Watchlist => (
                format!("Movie {verb} watchlist"),
                ListBody::Watchlist(entries),
            ),
            ListKind::Favorites => (
                format!("Movie {verb} favorites"),
                ListBody::Favorites(entries),
            ),
        };
        Self { message, list }
    }
}

#[derive(Serialize)]
pub struct ReviewMutationResponse {
    pub message: &'static str,
    pub reviews: Vec<ReviewEntryResponse>,
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToListRequest {
    pub movie_id: i32,
    pub title: String,
    pub poster: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequest {
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

// ── Shared list operations ───────────────────────────────────────────────────

async fn get_list(
    state: AppState,
    identity: Identity,
    kind: ListKind,
) -> Result<Json<Vec<MovieEntryResponse>>, ApiError> {
    let usecase = GetListUseCase {
        repo: state.user_repo(),
    };
    let entries = usecase.execute(identity.user_id, kind).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

async fn add_to_list(
    state: AppState,
    identity: Identity,
    kind: ListKind,
    body: AddToListRequest,
) -> Result<Json<ListMutationResponse>, ApiError> {
    let usecase = AddToListUseCase {
        repo: state.user_repo(),
    };
    let entries = usecase
        .execute(
            identity.user_id,
            kind,
            AddToListInput {
                movie_id: body.movie_id,
                title: body.title,
                poster: body.poster,
            },
        )
        .await?;
    Ok(Json(ListMutationResponse::new(kind, "added to", entries)))
}

async fn remove_from_list(
    state: AppState,
    identity: Identity,
    kind: ListKind,
    movie_id: i32,
) -> Result<Json<ListMutationResponse>, ApiError> {
    let usecase = RemoveFromListUseCase {
        repo: state.user_repo(),
    };
    let entries = usecase.execute(identity.user_id, kind, movie_id).await?;
    Ok(Json(ListMutationResponse::new(kind, "removed from", entries)))
}

// ── /api/users/watchlist ─────────────────────────────────────────────────────

pub async fn get_watchlist(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieEntryResponse>>, ApiError> {
    get_list(state, identity, ListKind::Watchlist).await
}

pub async fn add_to_watchlist(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<AddToListRequest>,
) -> Result<Json<ListMutationResponse>, ApiError> {
    add_to_list(state, identity, ListKind::Watchlist, body).await
}

pub async fn remove_from_watchlist(
    identity: Identity,
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<Json<ListMutationResponse>, ApiError> {
    remove_from_list(state, identity, ListKind::Watchlist, movie_id).await
}

// ── /api/users/favorites ─────────────────────────────────────────────────────

pub async fn get_favorites(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieEntryResponse>>, ApiError> {
    get_list(state, identity, ListKind::Favorites).await
}

pub async fn add_to_favorites(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<AddToListRequest>,
) -> Result<Json<ListMutationResponse>, ApiError> {
    add_to_list(state, identity, ListKind::Favorites, body).await
}

pub async fn remove_from_favorites(
    identity: Identity,
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<Json<ListMutationResponse>, ApiError> {
    remove_from_list(state, identity, ListKind::Favorites, movie_id).await
}

// ── /api/users/reviews ───────────────────────────────────────────────────────

pub async fn get_reviews(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewEntryResponse>>, ApiError> {
    let usecase = GetReviewsUseCase {
        repo: state.user_repo(),
    };
    let reviews = usecase.execute(identity.user_id).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

pub async fn add_review(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<AddReviewRequest>,
) -> Result<Json<ReviewMutationResponse>, ApiError> {
    let usecase = AddReviewUseCase {
        repo: state.user_repo(),
    };
    let reviews = usecase
        .execute(
            identity.user_id,
            AddReviewInput {
                movie_id: body.movie_id,
                movie_title: body.movie_title,
                rating: body.rating,
                comment: body.comment,
            },
        )
        .await?;
    Ok(Json(ReviewMutationResponse {
        message: "Review added successfully",
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}
