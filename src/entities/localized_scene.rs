use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "localized_scenes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scene_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub locale: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scene::Entity",
        from = "Column::SceneId",
        to = "super::scene::Column::Id"
    )]
    Scene,
}

impl Related<super::scene::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scene.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
