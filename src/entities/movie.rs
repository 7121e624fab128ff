use std::collections::BTreeMap;

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Genre code to display name, stored as a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Genres(pub BTreeMap<i32, String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub tmdb_id: Option<i32>,
    pub release_year: Option<i32>,
    #[sea_orm(column_type = "Json", nullable)]
    pub genres: Option<Genres>,
    pub imdb_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::localized_movie::Entity")]
    LocalizedMovie,
    #[sea_orm(has_many = "super::scene::Entity")]
    Scene,
}

impl Related<super::localized_movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocalizedMovie.def()
    }
}

impl Related<super::scene::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scene.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
