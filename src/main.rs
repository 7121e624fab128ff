use std::{sync::Arc, time::Duration};

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use cinemap::{
    AppState,
    config::Config,
    db,
    service::{MovieService, SceneService},
    store::CatalogStore,
    tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cinemap=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("cinemap/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    // TMDB gets its own client so the provider timeout stays fixed and short.
    let tmdb_http = reqwest::Client::builder()
        .user_agent("cinemap/0.1")
        .timeout(Duration::from_millis(config.tmdb_timeout_ms))
        .connect_timeout(Duration::from_millis(config.tmdb_timeout_ms))
        .build()?;

    let conn = db::connect_and_migrate(&config.database_url).await?;
    let store = CatalogStore::new(conn);

    let movies = MovieService::new(store.clone(), config.default_locale.clone());
    let scenes = SceneService::new(store, config.default_locale.clone());

    let tmdb = TmdbClient::new(
        tmdb_http,
        config.tmdb_access_token.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_image_base_url.clone(),
        config.tmdb_rps,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        http,
        movies,
        scenes,
        tmdb: Arc::new(tmdb),
    });

    let app = cinemap::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
