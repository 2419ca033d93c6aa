use std::time::Duration;

use anyhow::Context as _;
use sea_orm::{ConnectOptions, Database};
use tracing::info;

use movieapp_api::config::AppConfig;
use movieapp_api::infra::tmdb::TmdbClient;
use movieapp_api::router::build_router;
use movieapp_api::state::AppState;
use movieapp_auth_types::identity::TokenSecret;
use movieapp_core::shutdown::shutdown_signal;
use movieapp_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = AppConfig::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(Duration::from_secs(15))
        .idle_timeout(Duration::from_secs(45))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("connect to database")?;
    db.ping().await.context("ping database")?;
    info!("database connected");

    let catalog = TmdbClient::new(&config.tmdb_base_url, &config.tmdb_api_key)?;

    let state = AppState {
        db: db.clone(),
        token_secret: TokenSecret::new(config.jwt_secret),
        token_ttl_secs: config.jwt_ttl_secs,
        catalog,
    };

    let router = build_router(state, &config.frontend_url);
    let http_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("api listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await.context("close database")?;
    info!("database connection closed");
    Ok(())
}
