use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::locale::is_valid_locale;
use crate::models::{MovieFlatDto, MovieLocalizationsDto, SceneFlatDto, SceneLocalizationsDto};

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    locale: Option<String>,
}

impl LocaleQuery {
    /// Requested locale, defaulting to the configured one. An explicitly
    /// malformed locale is rejected rather than silently falling back.
    fn requested<'a>(&'a self, default: &'a str) -> ApiResult<&'a str> {
        match self.locale.as_deref() {
            Some(locale) if !is_valid_locale(locale) => Err(ApiError::Validation(format!(
                "locale must be a two-letter lowercase code, got '{locale}'"
            ))),
            Some(locale) => Ok(locale),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OverrideQuery {
    #[serde(default, rename = "override")]
    override_existing: bool,
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LocaleQuery>,
) -> ApiResult<Json<Vec<MovieFlatDto>>> {
    let movies = state.movies.find_all(q.requested(&state.config.default_locale)?).await?;
    Ok(Json(movies))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(dto): Json<MovieFlatDto>,
) -> ApiResult<StatusCode> {
    dto.validate()?;
    state.movies.save(&dto).await?;
    Ok(StatusCode::CREATED)
}

pub async fn delete_all_movies(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.movies.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_movie_from_tmdb(
    State(state): State<Arc<AppState>>,
    Path(tmdb_id): Path<i32>,
) -> ApiResult<(StatusCode, Json<MovieFlatDto>)> {
    let created = state.movies.create_from_tmdb(&state.tmdb, tmdb_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
    Query(q): Query<LocaleQuery>,
) -> ApiResult<Json<MovieFlatDto>> {
    let movie = state.movies.find_by_uuid(uuid, q.requested(&state.config.default_locale)?).await?;
    Ok(Json(movie))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
    Json(dto): Json<MovieFlatDto>,
) -> ApiResult<StatusCode> {
    dto.validate()?;
    state.movies.update(&dto, uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.movies.delete_by_uuid(uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_movie_localizations(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
) -> ApiResult<Json<MovieLocalizationsDto>> {
    Ok(Json(state.movies.get_localizations(uuid).await?))
}

pub async fn put_movie_localizations(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
    Query(q): Query<OverrideQuery>,
    Json(bundle): Json<MovieLocalizationsDto>,
) -> ApiResult<StatusCode> {
    bundle.validate()?;
    state.movies.update_localizations(uuid, &bundle, q.override_existing).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_scenes(
    State(state): State<Arc<AppState>>,
    Path(movie_uuid): Path<Uuid>,
    Query(q): Query<LocaleQuery>,
) -> ApiResult<Json<Vec<SceneFlatDto>>> {
    let scenes = state.scenes.find_all_for_movie(movie_uuid, q.requested(&state.config.default_locale)?).await?;
    Ok(Json(scenes))
}

pub async fn create_scene(
    State(state): State<Arc<AppState>>,
    Path(movie_uuid): Path<Uuid>,
    Json(dto): Json<SceneFlatDto>,
) -> ApiResult<StatusCode> {
    dto.validate()?;
    state.scenes.save(&dto, movie_uuid).await?;
    Ok(StatusCode::CREATED)
}

pub async fn delete_all_scenes(
    State(state): State<Arc<AppState>>,
    Path(movie_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.scenes.delete_all_for_movie(movie_uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_scene(
    State(state): State<Arc<AppState>>,
    Path((movie_uuid, scene_uuid)): Path<(Uuid, Uuid)>,
    Query(q): Query<LocaleQuery>,
) -> ApiResult<Json<SceneFlatDto>> {
    let scene = state.scenes.find_by_uuid(movie_uuid, scene_uuid, q.requested(&state.config.default_locale)?).await?;
    Ok(Json(scene))
}

pub async fn update_scene(
    State(state): State<Arc<AppState>>,
    Path((movie_uuid, scene_uuid)): Path<(Uuid, Uuid)>,
    Json(dto): Json<SceneFlatDto>,
) -> ApiResult<StatusCode> {
    dto.validate()?;
    state.scenes.update(&dto, movie_uuid, scene_uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_scene(
    State(state): State<Arc<AppState>>,
    Path((movie_uuid, scene_uuid)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state.scenes.delete_by_uuid(movie_uuid, scene_uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_scene_localizations(
    State(state): State<Arc<AppState>>,
    Path((movie_uuid, scene_uuid)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<SceneLocalizationsDto>> {
    Ok(Json(state.scenes.get_localizations(movie_uuid, scene_uuid).await?))
}

pub async fn put_scene_localizations(
    State(state): State<Arc<AppState>>,
    Path((movie_uuid, scene_uuid)): Path<(Uuid, Uuid)>,
    Query(q): Query<OverrideQuery>,
    Json(bundle): Json<SceneLocalizationsDto>,
) -> ApiResult<StatusCode> {
    bundle.validate()?;
    state
        .scenes
        .update_localizations(movie_uuid, scene_uuid, &bundle, q.override_existing)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
