use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::AppState;
use crate::models::MovieFlatDto;
use crate::templates;

/// Thin client for the repository's own REST API. The UI page goes through
/// HTTP rather than calling the service directly, mirroring a standalone
/// deployment of the UI.
pub struct RepositoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RepositoryClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub async fn list_movies(&self, locale: &str) -> anyhow::Result<Vec<MovieFlatDto>> {
        let url = format!("{}/api/v1/movies", self.base_url);
        let movies = self
            .http
            .get(url)
            .query(&[("locale", locale)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(movies)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    locale: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PageQuery>,
) -> Html<String> {
    let locale = q.locale.unwrap_or_else(|| state.config.default_locale.clone());
    let client =
        RepositoryClient::new(state.http.clone(), state.config.repository_base_url.clone());

    match client.list_movies(&locale).await {
        Ok(movies) => Html(templates::movies_page(&locale, &movies)),
        Err(err) => {
            tracing::warn!(error = %err, "failed to load movie list for UI");
            Html(templates::error_page(err.to_string()))
        },
    }
}
