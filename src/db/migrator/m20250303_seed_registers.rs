use crate::entities::{prelude::*, register_items};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const LANGUAGES: &[(&str, &str)] = &[
    ("CZ", "Czech"),
    ("EN", "English"),
    ("FR", "French"),
    ("JP", "Japanese"),
    ("SK", "Slovak"),
];

const FORMATS: &[(&str, &str)] = &[
    ("ISO", "ISO image"),
    ("STEAM", "Steam"),
    ("BINARY", "Binary"),
    ("GOG", "GOG"),
    ("BATTLE_NET", "Battle.net"),
    ("ORIGIN", "Origin"),
    ("UPLAY", "Uplay"),
    ("EPIC", "Epic Games Store"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Subtitles share the language codes.
        let registers = [
            ("languages", LANGUAGES),
            ("subtitles", LANGUAGES),
            ("formats", FORMATS),
        ];

        let mut insert = Query::insert()
            .into_table(RegisterItems)
            .columns([
                register_items::Column::Register,
                register_items::Column::Code,
                register_items::Column::Name,
                register_items::Column::Position,
            ])
            .to_owned();

        for (register, items) in registers {
            for (position, (code, name)) in (1_i32..).zip(items.iter()) {
                insert.values_panic([
                    register.into(),
                    (*code).into(),
                    (*name).into(),
                    position.into(),
                ]);
            }
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(RegisterItems).to_owned())
            .await?;

        Ok(())
    }
}
