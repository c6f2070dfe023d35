use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cheat_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cheat_id: i32,
    pub position: i32,
    pub action: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cheats::Entity",
        from = "Column::CheatId",
        to = "super::cheats::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Cheats,
}

impl Related<super::cheats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cheats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
