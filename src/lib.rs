pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod locale;
pub mod localization;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod templates;
pub mod tmdb;
pub mod ui;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::Config;
use crate::service::{MovieService, SceneService};
use crate::tmdb::TmdbClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub movies: MovieService,
    pub scenes: SceneService,
    pub tmdb: Arc<TmdbClient>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route(
            "/api/v1/movies",
            get(routes::list_movies)
                .post(routes::create_movie)
                .delete(routes::delete_all_movies),
        )
        .route("/api/v1/movies/tmdb/{tmdb_id}", post(routes::create_movie_from_tmdb))
        .route(
            "/api/v1/movies/{uuid}",
            get(routes::get_movie).put(routes::update_movie).delete(routes::delete_movie),
        )
        .route(
            "/api/v1/movies/{uuid}/localizations",
            get(routes::get_movie_localizations).put(routes::put_movie_localizations),
        )
        .route(
            "/api/v1/movies/{uuid}/scenes",
            get(routes::list_scenes).post(routes::create_scene).delete(routes::delete_all_scenes),
        )
        .route(
            "/api/v1/movies/{uuid}/scenes/{scene_uuid}",
            get(routes::get_scene).put(routes::update_scene).delete(routes::delete_scene),
        )
        .route(
            "/api/v1/movies/{uuid}/scenes/{scene_uuid}/localizations",
            get(routes::get_scene_localizations).put(routes::put_scene_localizations),
        )
        .with_state(state)
}
