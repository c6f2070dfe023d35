use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub normalized_name: String,
    pub media_count: i32,
    /// Code from the `formats` register
    pub format: String,
    pub crack: bool,
    pub serial_key: bool,
    pub patch: bool,
    pub note: Option<String>,
    pub picture_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pictures::Entity",
        from = "Column::PictureId",
        to = "super::pictures::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Pictures,
    #[sea_orm(has_one = "super::cheats::Entity")]
    Cheats,
}

impl Related<super::pictures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pictures.def()
    }
}

impl Related<super::cheats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cheats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
