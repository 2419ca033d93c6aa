//! Read-only pass-through to the movie metadata provider.

use serde_json::Value;

use movieapp_domain::pagination::upstream_page;

use crate::domain::repository::MovieCatalogPort;
use crate::domain::types::MovieListing;
use crate::error::ApiError;

pub struct SearchMoviesUseCase<C: MovieCatalogPort> {
    pub catalog: C,
}

impl<C: MovieCatalogPort> SearchMoviesUseCase<C> {
    pub async fn execute(&self, query: &str, page: Option<u32>) -> Result<Value, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::MissingData);
        }
        self.catalog.search(query, upstream_page(page)).await
    }
}

pub struct GetMovieListingUseCase<C: MovieCatalogPort> {
    pub catalog: C,
}

impl<C: MovieCatalogPort> GetMovieListingUseCase<C> {
    pub async fn execute(&self, listing: MovieListing, page: Option<u32>) -> Result<Value, ApiError> {
        self.catalog.listing(listing, upstream_page(page)).await
    }
}

pub struct GetGenresUseCase<C: MovieCatalogPort> {
    pub catalog: C,
}

impl<C: MovieCatalogPort> GetGenresUseCase<C> {
    pub async fn execute(&self) -> Result<Value, ApiError> {
        self.catalog.genres().await
    }
}

pub struct DiscoverByGenreUseCase<C: MovieCatalogPort> {
    pub catalog: C,
}

impl<C: MovieCatalogPort> DiscoverByGenreUseCase<C> {
    pub async fn execute(&self, genre_id: i32, page: Option<u32>) -> Result<Value, ApiError> {
        self.catalog.by_genre(genre_id, upstream_page(page)).await
    }
}

pub struct GetMovieDetailsUseCase<C: MovieCatalogPort> {
    pub catalog: C,
}

impl<C: MovieCatalogPort> GetMovieDetailsUseCase<C> {
    pub async fn execute(&self, movie_id: i32) -> Result<Value, ApiError> {
        self.catalog.details(movie_id).await
    }
}
