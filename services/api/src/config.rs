use anyhow::Context as _;

use movieapp_auth_types::token::DEFAULT_TOKEN_TTL_SECS;

/// API service configuration loaded from environment variables.
pub struct AppConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Maximum pooled connections (default 10). Env var: `DB_MAX_CONNECTIONS`.
    pub db_max_connections: u32,
    /// HMAC secret for bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Token lifetime in seconds (default 30 days). Env var: `JWT_TTL_SECS`.
    pub jwt_ttl_secs: u64,
    /// Env var: `TMDB_API_KEY`.
    pub tmdb_api_key: String,
    /// Env var: `TMDB_BASE_URL`.
    pub tmdb_base_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `PORT`.
    pub port: u16,
    /// Single origin allowed by CORS. Env var: `FRONTEND_URL`.
    pub frontend_url: String,
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("{key} must be set"))
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("invalid {key}: {v:?}")),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", 10)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_secs: parsed_or("JWT_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
            tmdb_api_key: required("TMDB_API_KEY")?,
            tmdb_base_url: std::env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_owned()),
            port: parsed_or("PORT", 5000)?,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_owned()),
        })
    }
}
