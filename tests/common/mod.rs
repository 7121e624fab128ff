#![allow(dead_code)]

use std::collections::BTreeMap;

use uuid::Uuid;

use cinemap::db;
use cinemap::models::{MovieFlatDto, SceneFlatDto};
use cinemap::service::{MovieService, SceneService};
use cinemap::store::CatalogStore;

pub const DEFAULT_LOCALE: &str = "en";

/// Fresh services over an isolated in-memory database.
pub async fn services() -> (MovieService, SceneService, CatalogStore) {
    let conn = db::connect_and_migrate("sqlite::memory:").await.expect("in-memory database");
    let store = CatalogStore::new(conn);
    (
        MovieService::new(store.clone(), DEFAULT_LOCALE.to_string()),
        SceneService::new(store.clone(), DEFAULT_LOCALE.to_string()),
        store,
    )
}

/// The "Dances with Wolves" fixture, one locale at a time.
pub fn wolf_movie(uuid: Uuid, locale: &str, title: &str) -> MovieFlatDto {
    MovieFlatDto {
        uuid,
        tmdb_id: Some(581),
        release_year: Some(1990),
        genres: BTreeMap::from([(80, "western".to_string()), (85, "drama".to_string())]),
        imdb_id: Some("tt0099348".to_string()),
        locale: locale.to_string(),
        title: title.to_string(),
        overview: Some(format!("{title} - Overview")),
        tagline: Some(format!("{title} - Tagline")),
        poster_url: Some("https://image.example.com/w300/wolf.jpg".to_string()),
    }
}

pub fn scene(uuid: Uuid, movie_uuid: Uuid, locale: &str, description: &str) -> SceneFlatDto {
    SceneFlatDto {
        uuid,
        movie_uuid,
        latitude: 52.51263,
        longitude: 13.35943,
        locale: locale.to_string(),
        description: description.to_string(),
    }
}
