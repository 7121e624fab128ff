use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Poster used when TMDB has no usable `poster_path` for a movie.
const PLACEHOLDER_POSTER: &str = "/w300/3JWLA3OYN6olbJXg6dDWLWiCxpn.jpg";

/// Raw movie fields pulled from the TMDB details endpoint. Missing JSON
/// fields come back as "N/A" rather than failing the call.
#[derive(Clone, Debug, PartialEq)]
pub struct TmdbMovieDetails {
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub imdb_id: Option<String>,
    pub release_year: Option<i32>,
    pub poster_url: Option<String>,
}

pub struct TmdbClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    image_base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        access_token: String,
        base_url: String,
        image_base_url: String,
        rps: u32,
    ) -> Self {
        // Warn once on app load if using mock data
        if access_token.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_ACCESS_TOKEN provided");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, access_token, base_url, image_base_url, limiter }
    }

    pub async fn movie_details(&self, tmdb_id: i32) -> ApiResult<TmdbMovieDetails> {
        // Use mock data if access token is not provided
        if self.access_token.trim().is_empty() {
            return Ok(TmdbMovieDetails {
                title: "Fight Club".to_string(),
                overview: Some("Mock overview".to_string()),
                tagline: Some("Mock tagline".to_string()),
                imdb_id: Some("tt0137523".to_string()),
                release_year: Some(1999),
                poster_url: Some(format!("{}{}", self.image_base_url, PLACEHOLDER_POSTER)),
            });
        }

        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let body: Value = self
            .client
            .get(url)
            .query(&[("language", "en-US")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| ApiError::TmdbRead(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::TmdbRead(e.to_string()))?
            .json()
            .await
            .map_err(|e| ApiError::TmdbRead(e.to_string()))?;

        Ok(details_from_json(&body, &self.image_base_url))
    }
}

fn details_from_json(body: &Value, image_base_url: &str) -> TmdbMovieDetails {
    let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);

    let poster_url = match body.get("poster_path").and_then(Value::as_str) {
        Some(path) => {
            let candidate = format!("{image_base_url}/w300{path}");
            match url::Url::parse(&candidate) {
                Ok(_) => Some(candidate),
                Err(_) => Some(format!("{image_base_url}{PLACEHOLDER_POSTER}")),
            }
        },
        None => Some(format!("{image_base_url}{PLACEHOLDER_POSTER}")),
    };

    let release_year = body
        .get("release_date")
        .and_then(Value::as_str)
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok());

    TmdbMovieDetails {
        title: text("title").unwrap_or_else(|| "N/A".to_string()),
        overview: text("overview").or_else(|| Some("N/A".to_string())),
        tagline: text("tagline").or_else(|| Some("N/A".to_string())),
        imdb_id: text("imdb_id"),
        release_year,
        poster_url,
    }
}
