use std::collections::BTreeSet;

use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{movie, scene};
use crate::error::{ApiError, ApiResult};
use crate::locale;
use crate::localization;
use crate::models::{
    LocalizedMovieDto, LocalizedMovieFields, LocalizedSceneDto, LocalizedSceneFields, MovieFlatDto,
    MovieLocalizationsDto, SceneFlatDto, SceneLocalizationsDto,
};
use crate::store::{CatalogStore, LocalizedMovies, LocalizedScenes, MovieCore};
use crate::tmdb::TmdbClient;

/// Orchestrates load -> locale resolution -> merge -> persist for movies and
/// owns the uuid-uniqueness and cascade-delete contracts.
#[derive(Clone)]
pub struct MovieService {
    store: CatalogStore,
    default_locale: String,
}

impl MovieService {
    pub fn new(store: CatalogStore, default_locale: String) -> Self {
        Self { store, default_locale }
    }

    /// Flatten every movie at its resolved locale. A resolution miss on any
    /// single movie fails the whole call, no partial results.
    pub async fn find_all(&self, requested: &str) -> ApiResult<Vec<MovieFlatDto>> {
        let mut out = Vec::new();
        for (m, localized) in self.store.find_all_movies().await? {
            out.push(self.flatten_movie(&m, &localized, requested)?);
        }
        Ok(out)
    }

    pub async fn find_by_uuid(&self, uuid: Uuid, requested: &str) -> ApiResult<MovieFlatDto> {
        let (m, localized) = self.load_movie(uuid).await?;
        self.flatten_movie(&m, &localized, requested)
    }

    /// Create a movie with exactly one localized entry.
    pub async fn save(&self, dto: &MovieFlatDto) -> ApiResult<()> {
        if self.store.movie_exists(dto.uuid).await? {
            return Err(ApiError::UuidInUse(format!("movie uuid {} already in use", dto.uuid)));
        }

        let mut localized = LocalizedMovies::new();
        localized.insert(dto.locale.clone(), dto.localized_fields());

        self.store.insert_movie(movie_core(dto, dto.uuid), localized).await?;
        debug!(uuid = %dto.uuid, locale = %dto.locale, "movie created");
        Ok(())
    }

    /// Overwrite core scalars and insert-or-replace the DTO's locale. This
    /// path always overrides, unlike the localization endpoint where the
    /// caller controls overriding.
    pub async fn update(&self, dto: &MovieFlatDto, uuid: Uuid) -> ApiResult<()> {
        let (m, mut localized) = self.load_movie(uuid).await?;

        localized.insert(dto.locale.clone(), dto.localized_fields());
        self.store.update_movie(m.id, movie_core(dto, uuid), localized).await?;
        debug!(uuid = %uuid, locale = %dto.locale, "movie updated");
        Ok(())
    }

    /// Remove the movie and all scenes referencing it, scenes first.
    pub async fn delete_by_uuid(&self, uuid: Uuid) -> ApiResult<()> {
        let (m, _) = self.load_movie(uuid).await?;
        self.store.delete_movie(m.id).await?;
        debug!(uuid = %uuid, "movie deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> ApiResult<()> {
        info!("deleting all movies and scenes");
        self.store.delete_all().await
    }

    /// Fetch details from TMDB and persist a new movie with one localized
    /// entry. Provider failures surface before anything is written.
    pub async fn create_from_tmdb(&self, tmdb: &TmdbClient, tmdb_id: i32) -> ApiResult<MovieFlatDto> {
        let details = tmdb.movie_details(tmdb_id).await?;

        let dto = MovieFlatDto {
            uuid: Uuid::new_v4(),
            tmdb_id: Some(tmdb_id),
            release_year: details.release_year,
            genres: Default::default(),
            imdb_id: details.imdb_id,
            locale: self.default_locale.clone(),
            title: details.title,
            overview: details.overview,
            tagline: details.tagline,
            poster_url: details.poster_url,
        };
        self.save(&dto).await?;
        Ok(dto)
    }

    pub async fn get_localizations(&self, uuid: Uuid) -> ApiResult<MovieLocalizationsDto> {
        let (m, localized) = self.load_movie(uuid).await?;

        let localizations = localized
            .into_iter()
            .map(|(locale, fields)| LocalizedMovieDto {
                locale,
                title: fields.title,
                overview: fields.overview,
                tagline: fields.tagline,
                poster_url: fields.poster_url,
            })
            .collect();
        Ok(MovieLocalizationsDto { uuid: m.uuid, localizations })
    }

    /// Merge a localization bundle into the movie's locale map per the merge
    /// engine: additions always land, existing locales only when `override_existing`.
    pub async fn update_localizations(
        &self,
        uuid: Uuid,
        bundle: &MovieLocalizationsDto,
        override_existing: bool,
    ) -> ApiResult<()> {
        let (m, mut localized) = self.load_movie(uuid).await?;

        for entry in &bundle.localizations {
            let applied = localization::merge(
                &mut localized,
                entry.locale.clone(),
                LocalizedMovieFields {
                    title: entry.title.clone(),
                    overview: entry.overview.clone(),
                    tagline: entry.tagline.clone(),
                    poster_url: entry.poster_url.clone(),
                },
                override_existing,
            );
            if !applied {
                debug!(uuid = %uuid, locale = %entry.locale, "locale exists, not overriding");
            }
        }

        self.store.save_movie_localizations(m.id, &localized).await
    }

    async fn load_movie(&self, uuid: Uuid) -> ApiResult<(movie::Model, LocalizedMovies)> {
        self.store
            .find_movie_by_uuid(uuid)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("movie {uuid} not found")))
    }

    fn flatten_movie(
        &self,
        m: &movie::Model,
        localized: &LocalizedMovies,
        requested: &str,
    ) -> ApiResult<MovieFlatDto> {
        let available: BTreeSet<String> = localized.keys().cloned().collect();
        let effective = locale::resolve(&available, requested, &self.default_locale)?;
        let fields = &localized[effective];

        Ok(MovieFlatDto {
            uuid: m.uuid,
            tmdb_id: m.tmdb_id,
            release_year: m.release_year,
            genres: m.genres.clone().map(|g| g.0).unwrap_or_default(),
            imdb_id: m.imdb_id.clone(),
            locale: effective.to_string(),
            title: fields.title.clone(),
            overview: fields.overview.clone(),
            tagline: fields.tagline.clone(),
            poster_url: fields.poster_url.clone(),
        })
    }
}

/// Same orchestration for scenes, scoped under a parent movie.
#[derive(Clone)]
pub struct SceneService {
    store: CatalogStore,
    default_locale: String,
}

impl SceneService {
    pub fn new(store: CatalogStore, default_locale: String) -> Self {
        Self { store, default_locale }
    }

    pub async fn find_all_for_movie(
        &self,
        movie_uuid: Uuid,
        requested: &str,
    ) -> ApiResult<Vec<SceneFlatDto>> {
        let movie = self.load_parent(movie_uuid).await?;

        let mut out = Vec::new();
        for (s, localized) in self.store.find_scenes_for_movie(movie.id).await? {
            out.push(self.flatten_scene(&s, movie.uuid, &localized, requested)?);
        }
        Ok(out)
    }

    pub async fn find_by_uuid(
        &self,
        movie_uuid: Uuid,
        scene_uuid: Uuid,
        requested: &str,
    ) -> ApiResult<SceneFlatDto> {
        let movie = self.load_parent(movie_uuid).await?;
        let (s, localized) = self.load_scene_of(&movie, scene_uuid).await?;
        self.flatten_scene(&s, movie.uuid, &localized, requested)
    }

    pub async fn save(&self, dto: &SceneFlatDto, movie_uuid: Uuid) -> ApiResult<()> {
        let movie = self.load_parent(movie_uuid).await?;

        if self.store.scene_exists(dto.uuid).await? {
            return Err(ApiError::UuidInUse(format!("scene uuid {} already in use", dto.uuid)));
        }

        let mut localized = LocalizedScenes::new();
        localized
            .insert(dto.locale.clone(), LocalizedSceneFields { description: dto.description.clone() });

        self.store.insert_scene(movie.id, dto.uuid, dto.latitude, dto.longitude, localized).await?;
        debug!(uuid = %dto.uuid, movie = %movie_uuid, "scene created");
        Ok(())
    }

    /// Like movie update: coordinates are overwritten and the DTO's locale is
    /// always inserted-or-replaced.
    pub async fn update(
        &self,
        dto: &SceneFlatDto,
        movie_uuid: Uuid,
        scene_uuid: Uuid,
    ) -> ApiResult<()> {
        let movie = self.load_parent(movie_uuid).await?;
        let (s, mut localized) = self.load_scene_of(&movie, scene_uuid).await?;

        localized
            .insert(dto.locale.clone(), LocalizedSceneFields { description: dto.description.clone() });
        self.store.update_scene(s.id, dto.latitude, dto.longitude, localized).await?;
        Ok(())
    }

    pub async fn delete_by_uuid(&self, movie_uuid: Uuid, scene_uuid: Uuid) -> ApiResult<()> {
        let movie = self.load_parent(movie_uuid).await?;
        let (s, _) = self.load_scene_of(&movie, scene_uuid).await?;
        self.store.delete_scene(s.id).await?;
        debug!(uuid = %scene_uuid, movie = %movie_uuid, "scene deleted");
        Ok(())
    }

    pub async fn delete_all_for_movie(&self, movie_uuid: Uuid) -> ApiResult<()> {
        let movie = self.load_parent(movie_uuid).await?;
        self.store.delete_scenes_for_movie(movie.id).await
    }

    pub async fn get_localizations(
        &self,
        movie_uuid: Uuid,
        scene_uuid: Uuid,
    ) -> ApiResult<SceneLocalizationsDto> {
        let movie = self.load_parent(movie_uuid).await?;
        let (s, localized) = self.load_scene_of(&movie, scene_uuid).await?;

        let localizations = localized
            .into_iter()
            .map(|(locale, fields)| LocalizedSceneDto { locale, description: fields.description })
            .collect();
        Ok(SceneLocalizationsDto { uuid: s.uuid, localizations })
    }

    pub async fn update_localizations(
        &self,
        movie_uuid: Uuid,
        scene_uuid: Uuid,
        bundle: &SceneLocalizationsDto,
        override_existing: bool,
    ) -> ApiResult<()> {
        let movie = self.load_parent(movie_uuid).await?;
        let (s, mut localized) = self.load_scene_of(&movie, scene_uuid).await?;

        for entry in &bundle.localizations {
            localization::merge(
                &mut localized,
                entry.locale.clone(),
                LocalizedSceneFields { description: entry.description.clone() },
                override_existing,
            );
        }

        self.store.save_scene_localizations(s.id, &localized).await
    }

    async fn load_parent(&self, movie_uuid: Uuid) -> ApiResult<movie::Model> {
        let (m, _) = self
            .store
            .find_movie_by_uuid(movie_uuid)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("movie {movie_uuid} not found")))?;
        Ok(m)
    }

    async fn load_scene_of(
        &self,
        movie: &movie::Model,
        scene_uuid: Uuid,
    ) -> ApiResult<(scene::Model, LocalizedScenes)> {
        let (s, localized) = self
            .store
            .find_scene_by_uuid(scene_uuid)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("scene {scene_uuid} not found")))?;
        if s.movie_id != movie.id {
            return Err(ApiError::NotFound(format!(
                "scene {scene_uuid} does not belong to movie {}",
                movie.uuid
            )));
        }
        Ok((s, localized))
    }

    fn flatten_scene(
        &self,
        s: &scene::Model,
        movie_uuid: Uuid,
        localized: &LocalizedScenes,
        requested: &str,
    ) -> ApiResult<SceneFlatDto> {
        let available: BTreeSet<String> = localized.keys().cloned().collect();
        let effective = locale::resolve(&available, requested, &self.default_locale)?;
        let fields = &localized[effective];

        Ok(SceneFlatDto {
            uuid: s.uuid,
            movie_uuid,
            latitude: s.latitude,
            longitude: s.longitude,
            locale: effective.to_string(),
            description: fields.description.clone(),
        })
    }
}

fn movie_core(dto: &MovieFlatDto, uuid: Uuid) -> MovieCore {
    MovieCore {
        uuid,
        tmdb_id: dto.tmdb_id,
        release_year: dto.release_year,
        genres: if dto.genres.is_empty() {
            None
        } else {
            Some(movie::Genres(dto.genres.clone()))
        },
        imdb_id: dto.imdb_id.clone(),
    }
}
