use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use serde_json::Value;

use crate::domain::repository::MovieCatalogPort;
use crate::domain::types::MovieListing;
use crate::error::ApiError;

/// Per-request timeout for provider calls.
pub const TMDB_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client implementing `MovieCatalogPort` against a TMDB-compatible API.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(TMDB_TIMEOUT)
            .build()
            .context("build TMDB HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// GET `path` with the API key and `params`, returning the JSON body untouched.
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let fetch = async {
            self.client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .query(params)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
        };
        // Strip the URL so the API key never reaches the logs.
        fetch
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("GET {path}"))
            .map_err(ApiError::Upstream)
    }
}

impl MovieCatalogPort for TmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<Value, ApiError> {
        self.get(
            "/search/movie",
            &[
                ("query", query.to_owned()),
                ("page", page.to_string()),
                ("include_adult", "false".to_owned()),
            ],
        )
        .await
    }

    async fn details(&self, movie_id: i32) -> Result<Value, ApiError> {
        self.get(
            &format!("/movie/{movie_id}"),
            &[("append_to_response", "videos,credits,reviews".to_owned())],
        )
        .await
    }

    async fn listing(&self, listing: MovieListing, page: u32) -> Result<Value, ApiError> {
        self.get(listing.path(), &[("page", page.to_string())]).await
    }

    async fn genres(&self) -> Result<Value, ApiError> {
        self.get("/genre/movie/list", &[]).await
    }

    async fn by_genre(&self, genre_id: i32, page: u32) -> Result<Value, ApiError> {
        self.get(
            "/discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }
}
