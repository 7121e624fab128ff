use std::collections::BTreeMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{localized_movie, localized_scene, movie, scene};
use crate::error::ApiResult;
use crate::models::{LocalizedMovieFields, LocalizedSceneFields};

pub type LocalizedMovies = BTreeMap<String, LocalizedMovieFields>;
pub type LocalizedScenes = BTreeMap<String, LocalizedSceneFields>;

/// Core (non-localized) movie fields as written by create/update.
#[derive(Clone, Debug)]
pub struct MovieCore {
    pub uuid: Uuid,
    pub tmdb_id: Option<i32>,
    pub release_year: Option<i32>,
    pub genres: Option<movie::Genres>,
    pub imdb_id: Option<String>,
}

#[derive(Clone)]
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_all_movies(&self) -> ApiResult<Vec<(movie::Model, LocalizedMovies)>> {
        let movies = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;

        let mut out = Vec::with_capacity(movies.len());
        for m in movies {
            let localized = self.movie_localizations(m.id).await?;
            out.push((m, localized));
        }
        Ok(out)
    }

    pub async fn find_movie_by_uuid(
        &self,
        uuid: Uuid,
    ) -> ApiResult<Option<(movie::Model, LocalizedMovies)>> {
        let Some(m) =
            movie::Entity::find().filter(movie::Column::Uuid.eq(uuid)).one(&self.db).await?
        else {
            return Ok(None);
        };
        let localized = self.movie_localizations(m.id).await?;
        Ok(Some((m, localized)))
    }

    pub async fn movie_exists(&self, uuid: Uuid) -> ApiResult<bool> {
        let found =
            movie::Entity::find().filter(movie::Column::Uuid.eq(uuid)).one(&self.db).await?;
        Ok(found.is_some())
    }

    pub async fn insert_movie(&self, core: MovieCore, localized: LocalizedMovies) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        let model = movie::ActiveModel {
            id: Default::default(),
            uuid: Set(core.uuid),
            tmdb_id: Set(core.tmdb_id),
            release_year: Set(core.release_year),
            genres: Set(core.genres),
            imdb_id: Set(core.imdb_id),
        };
        let movie_id = movie::Entity::insert(model).exec(&txn).await?.last_insert_id;

        insert_movie_localizations(&txn, movie_id, &localized).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Overwrite core scalars and replace the full localized map in one
    /// transaction. `uuid` stays whatever the row already carries.
    pub async fn update_movie(
        &self,
        movie_id: i32,
        core: MovieCore,
        localized: LocalizedMovies,
    ) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        let model = movie::ActiveModel {
            id: Set(movie_id),
            uuid: Set(core.uuid),
            tmdb_id: Set(core.tmdb_id),
            release_year: Set(core.release_year),
            genres: Set(core.genres),
            imdb_id: Set(core.imdb_id),
        };
        movie::Entity::update(model).exec(&txn).await?;

        localized_movie::Entity::delete_many()
            .filter(localized_movie::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;
        insert_movie_localizations(&txn, movie_id, &localized).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Replace only the localized children, leaving core scalars alone.
    pub async fn save_movie_localizations(
        &self,
        movie_id: i32,
        localized: &LocalizedMovies,
    ) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        localized_movie::Entity::delete_many()
            .filter(localized_movie::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;
        insert_movie_localizations(&txn, movie_id, localized).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Delete a movie and everything it owns. Scene rows go first so the
    /// referential constraints hold at every point of the transaction.
    pub async fn delete_movie(&self, movie_id: i32) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        let scenes = scene::Entity::find()
            .filter(scene::Column::MovieId.eq(movie_id))
            .all(&txn)
            .await?;
        for s in &scenes {
            localized_scene::Entity::delete_many()
                .filter(localized_scene::Column::SceneId.eq(s.id))
                .exec(&txn)
                .await?;
        }
        scene::Entity::delete_many()
            .filter(scene::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;

        localized_movie::Entity::delete_many()
            .filter(localized_movie::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;
        movie::Entity::delete_by_id(movie_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Clear the whole catalog, scenes before movies.
    pub async fn delete_all(&self) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        localized_scene::Entity::delete_many().exec(&txn).await?;
        scene::Entity::delete_many().exec(&txn).await?;
        localized_movie::Entity::delete_many().exec(&txn).await?;
        movie::Entity::delete_many().exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn find_scenes_for_movie(
        &self,
        movie_id: i32,
    ) -> ApiResult<Vec<(scene::Model, LocalizedScenes)>> {
        let scenes = scene::Entity::find()
            .filter(scene::Column::MovieId.eq(movie_id))
            .order_by_asc(scene::Column::Id)
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(scenes.len());
        for s in scenes {
            let localized = self.scene_localizations(s.id).await?;
            out.push((s, localized));
        }
        Ok(out)
    }

    pub async fn find_scene_by_uuid(
        &self,
        uuid: Uuid,
    ) -> ApiResult<Option<(scene::Model, LocalizedScenes)>> {
        let Some(s) =
            scene::Entity::find().filter(scene::Column::Uuid.eq(uuid)).one(&self.db).await?
        else {
            return Ok(None);
        };
        let localized = self.scene_localizations(s.id).await?;
        Ok(Some((s, localized)))
    }

    pub async fn scene_exists(&self, uuid: Uuid) -> ApiResult<bool> {
        let found =
            scene::Entity::find().filter(scene::Column::Uuid.eq(uuid)).one(&self.db).await?;
        Ok(found.is_some())
    }

    pub async fn count_scenes(&self) -> ApiResult<u64> {
        use sea_orm::PaginatorTrait;
        Ok(scene::Entity::find().count(&self.db).await?)
    }

    pub async fn insert_scene(
        &self,
        movie_id: i32,
        uuid: Uuid,
        latitude: f64,
        longitude: f64,
        localized: LocalizedScenes,
    ) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        let model = scene::ActiveModel {
            id: Default::default(),
            uuid: Set(uuid),
            movie_id: Set(movie_id),
            latitude: Set(latitude),
            longitude: Set(longitude),
        };
        let scene_id = scene::Entity::insert(model).exec(&txn).await?.last_insert_id;

        insert_scene_localizations(&txn, scene_id, &localized).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn update_scene(
        &self,
        scene_id: i32,
        latitude: f64,
        longitude: f64,
        localized: LocalizedScenes,
    ) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        let model = scene::ActiveModel {
            id: Set(scene_id),
            uuid: Default::default(),
            movie_id: Default::default(),
            latitude: Set(latitude),
            longitude: Set(longitude),
        };
        scene::Entity::update(model).exec(&txn).await?;

        localized_scene::Entity::delete_many()
            .filter(localized_scene::Column::SceneId.eq(scene_id))
            .exec(&txn)
            .await?;
        insert_scene_localizations(&txn, scene_id, &localized).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn save_scene_localizations(
        &self,
        scene_id: i32,
        localized: &LocalizedScenes,
    ) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        localized_scene::Entity::delete_many()
            .filter(localized_scene::Column::SceneId.eq(scene_id))
            .exec(&txn)
            .await?;
        insert_scene_localizations(&txn, scene_id, localized).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn delete_scene(&self, scene_id: i32) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        localized_scene::Entity::delete_many()
            .filter(localized_scene::Column::SceneId.eq(scene_id))
            .exec(&txn)
            .await?;
        scene::Entity::delete_by_id(scene_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn delete_scenes_for_movie(&self, movie_id: i32) -> ApiResult<()> {
        let txn = self.db.begin().await?;

        let scenes = scene::Entity::find()
            .filter(scene::Column::MovieId.eq(movie_id))
            .all(&txn)
            .await?;
        for s in &scenes {
            localized_scene::Entity::delete_many()
                .filter(localized_scene::Column::SceneId.eq(s.id))
                .exec(&txn)
                .await?;
        }
        scene::Entity::delete_many()
            .filter(scene::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn movie_localizations(&self, movie_id: i32) -> ApiResult<LocalizedMovies> {
        let rows = localized_movie::Entity::find()
            .filter(localized_movie::Column::MovieId.eq(movie_id))
            .all(&self.db)
            .await?;

        let mut map = BTreeMap::new();
        for row in rows {
            map.insert(
                row.locale,
                LocalizedMovieFields {
                    title: row.title,
                    overview: row.overview,
                    tagline: row.tagline,
                    poster_url: row.poster_url,
                },
            );
        }
        Ok(map)
    }

    async fn scene_localizations(&self, scene_id: i32) -> ApiResult<LocalizedScenes> {
        let rows = localized_scene::Entity::find()
            .filter(localized_scene::Column::SceneId.eq(scene_id))
            .all(&self.db)
            .await?;

        let mut map = BTreeMap::new();
        for row in rows {
            map.insert(row.locale, LocalizedSceneFields { description: row.description });
        }
        Ok(map)
    }
}

async fn insert_movie_localizations(
    txn: &DatabaseTransaction,
    movie_id: i32,
    localized: &LocalizedMovies,
) -> ApiResult<()> {
    for (locale, fields) in localized {
        let model = localized_movie::ActiveModel {
            movie_id: Set(movie_id),
            locale: Set(locale.clone()),
            title: Set(fields.title.clone()),
            overview: Set(fields.overview.clone()),
            tagline: Set(fields.tagline.clone()),
            poster_url: Set(fields.poster_url.clone()),
        };
        localized_movie::Entity::insert(model).exec(txn).await?;
    }
    Ok(())
}

async fn insert_scene_localizations(
    txn: &DatabaseTransaction,
    scene_id: i32,
    localized: &LocalizedScenes,
) -> ApiResult<()> {
    for (locale, fields) in localized {
        let model = localized_scene::ActiveModel {
            scene_id: Set(scene_id),
            locale: Set(locale.clone()),
            description: Set(fields.description.clone()),
        };
        localized_scene::Entity::insert(model).exec(txn).await?;
    }
    Ok(())
}
