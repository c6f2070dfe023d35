use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        create(manager, &schema, RegisterItems).await?;
        create(manager, &schema, Pictures).await?;
        create(manager, &schema, Genres).await?;
        create(manager, &schema, Authors).await?;

        create(manager, &schema, Movies).await?;
        create(manager, &schema, Media).await?;
        create(manager, &schema, MovieGenres).await?;

        create(manager, &schema, Shows).await?;
        create(manager, &schema, ShowGenres).await?;
        create(manager, &schema, Seasons).await?;
        create(manager, &schema, Episodes).await?;

        create(manager, &schema, Books).await?;
        create(manager, &schema, BookAuthors).await?;
        create(manager, &schema, BookGenres).await?;

        create(manager, &schema, Games).await?;
        create(manager, &schema, Cheats).await?;
        create(manager, &schema, CheatData).await?;

        create(manager, &schema, Music).await?;
        create(manager, &schema, Programs).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Programs).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Music).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CheatData).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cheats).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BookGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BookAuthors).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Books).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShowGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shows).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Media).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pictures).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RegisterItems).to_owned())
            .await?;

        Ok(())
    }
}
