use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::locale::is_valid_locale;

/// One movie translation as stored under its locale key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedMovieFields {
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_url: Option<String>,
}

/// One scene translation as stored under its locale key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedSceneFields {
    pub description: String,
}

/// Denormalized single-locale view of a movie: core fields plus the
/// localized fields at one effective locale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFlatDto {
    pub uuid: Uuid,
    pub tmdb_id: Option<i32>,
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genres: BTreeMap<i32, String>,
    pub imdb_id: Option<String>,
    pub locale: String,
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_url: Option<String>,
}

impl MovieFlatDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_locale(&self.locale)?;
        check_len("title", &self.title, 255)?;
        check_opt_len("overview", self.overview.as_deref(), 5000)?;
        check_opt_len("tagline", self.tagline.as_deref(), 255)?;
        check_opt_len("imdbId", self.imdb_id.as_deref(), 50)?;
        if let Some(year) = self.release_year {
            if year < 1700 {
                return Err(ApiError::Validation("releaseYear must be at least 1700".to_string()));
            }
        }
        for name in self.genres.values() {
            check_len("genre name", name, 50)?;
        }
        check_url("posterUrl", self.poster_url.as_deref())?;
        Ok(())
    }

    pub fn localized_fields(&self) -> LocalizedMovieFields {
        LocalizedMovieFields {
            title: self.title.clone(),
            overview: self.overview.clone(),
            tagline: self.tagline.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMovieDto {
    pub locale: String,
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_url: Option<String>,
}

/// Full localization bundle for one movie, every locale it carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieLocalizationsDto {
    pub uuid: Uuid,
    pub localizations: Vec<LocalizedMovieDto>,
}

impl MovieLocalizationsDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        for entry in &self.localizations {
            check_locale(&entry.locale)?;
            check_len("title", &entry.title, 255)?;
            check_opt_len("overview", entry.overview.as_deref(), 5000)?;
            check_opt_len("tagline", entry.tagline.as_deref(), 255)?;
            check_url("posterUrl", entry.poster_url.as_deref())?;
        }
        Ok(())
    }
}

/// Denormalized single-locale view of a scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFlatDto {
    pub uuid: Uuid,
    pub movie_uuid: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub locale: String,
    pub description: String,
}

impl SceneFlatDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_locale(&self.locale)?;
        check_len("description", &self.description, 5000)?;
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ApiError::Validation("latitude must be within [-90, 90]".to_string()));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ApiError::Validation("longitude must be within [-180, 180]".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedSceneDto {
    pub locale: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLocalizationsDto {
    pub uuid: Uuid,
    pub localizations: Vec<LocalizedSceneDto>,
}

impl SceneLocalizationsDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        for entry in &self.localizations {
            check_locale(&entry.locale)?;
            check_len("description", &entry.description, 5000)?;
        }
        Ok(())
    }
}

fn check_locale(locale: &str) -> Result<(), ApiError> {
    if !is_valid_locale(locale) {
        return Err(ApiError::Validation(format!(
            "locale must be a two-letter lowercase code, got '{locale}'"
        )));
    }
    Ok(())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.is_empty() || value.chars().count() > max {
        return Err(ApiError::Validation(format!("{field} must be 1..={max} characters")));
    }
    Ok(())
}

fn check_opt_len(field: &str, value: Option<&str>, max: usize) -> Result<(), ApiError> {
    match value {
        Some(v) => check_len(field, v, max),
        None => Ok(()),
    }
}

fn check_url(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    if let Some(v) = value {
        url::Url::parse(v)
            .map_err(|_| ApiError::Validation(format!("{field} must be a well-formed URL")))?;
    }
    Ok(())
}
