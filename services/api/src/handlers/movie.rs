use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::types::MovieListing;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::movie::{
    DiscoverByGenreUseCase, GetGenresUseCase, GetMovieDetailsUseCase, GetMovieListingUseCase,
    SearchMoviesUseCase,
};

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
}

// ── GET /api/movies/search ───────────────────────────────────────────────────

pub async fn search_movies(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let usecase = SearchMoviesUseCase {
        catalog: state.catalog,
    };
    Ok(Json(usecase.execute(&q.query, q.page).await?))
}

// ── GET /api/movies/{popular,top-rated,upcoming} ─────────────────────────────

async fn listing(
    state: AppState,
    listing: MovieListing,
    page: Option<u32>,
) -> Result<Json<Value>, ApiError> {
    let usecase = GetMovieListingUseCase {
        catalog: state.catalog,
    };
    Ok(Json(usecase.execute(listing, page).await?))
}

pub async fn popular_movies(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    listing(state, MovieListing::Popular, q.page).await
}

pub async fn top_rated_movies(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    listing(state, MovieListing::TopRated, q.page).await
}

pub async fn upcoming_movies(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    listing(state, MovieListing::Upcoming, q.page).await
}

// ── GET /api/movies/genres ───────────────────────────────────────────────────

pub async fn genres(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let usecase = GetGenresUseCase {
        catalog: state.catalog,
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/movies/genre/{genreId} ──────────────────────────────────────────

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let usecase = DiscoverByGenreUseCase {
        catalog: state.catalog,
    };
    Ok(Json(usecase.execute(genre_id, q.page).await?))
}

// ── GET /api/movies/{id} ─────────────────────────────────────────────────────

pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let usecase = GetMovieDetailsUseCase {
        catalog: state.catalog,
    };
    Ok(Json(usecase.execute(movie_id).await?))
}
