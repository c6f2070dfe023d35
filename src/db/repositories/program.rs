use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::{Filter, Page};
use crate::entities::{prelude::*, programs};
use crate::models::program::{Program, ProgramInput};
use crate::models::statistics::MediaStatistics;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl From<programs::Model> for Program {
    fn from(model: programs::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            media_count: model.media_count,
            format: model.format,
            crack: model.crack,
            serial_key: model.serial_key,
            note: model.note,
        }
    }
}

impl From<Program> for ProgramInput {
    fn from(program: Program) -> Self {
        Self {
            name: program.name,
            media_count: program.media_count,
            format: program.format,
            crack: program.crack,
            serial_key: program.serial_key,
            note: program.note,
        }
    }
}

pub struct ProgramRepository {
    conn: DatabaseConnection,
}

impl ProgramRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Program>> {
        let mut query = Programs::find()
            .order_by_asc(programs::Column::NormalizedName)
            .order_by_asc(programs::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                programs::Column::NormalizedName,
                &[programs::Column::Name],
                name,
            ));
        }

        let page = fetch_page(&self.conn, query, filter.paging).await?;
        Ok(page.map(Program::from))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Program>> {
        let program = Programs::find_by_id(id).one(&self.conn).await?;
        Ok(program.map(Program::from))
    }

    pub async fn create(&self, input: &ProgramInput) -> Result<Program> {
        let timestamp = now();
        let model = programs::ActiveModel {
            name: Set(input.name.clone()),
            normalized_name: Set(normalize(&input.name)),
            media_count: Set(input.media_count),
            format: Set(input.format.clone()),
            crack: Set(input.crack),
            serial_key: Set(input.serial_key),
            note: Set(input.note.clone()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model.into())
    }

    pub async fn update(&self, id: i32, input: &ProgramInput) -> Result<Option<Program>> {
        let Some(existing) = Programs::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: programs::ActiveModel = existing.into();
        active.name = Set(input.name.clone());
        active.normalized_name = Set(normalize(&input.name));
        active.media_count = Set(input.media_count);
        active.format = Set(input.format.clone());
        active.crack = Set(input.crack);
        active.serial_key = Set(input.serial_key);
        active.note = Set(input.note.clone());
        active.updated_at = Set(now());
        let model = active.update(&self.conn).await?;

        Ok(Some(model.into()))
    }

    pub async fn duplicate(&self, id: i32) -> Result<Option<Program>> {
        let Some(program) = self.get(id).await? else {
            return Ok(None);
        };

        let copy = self.create(&program.into()).await?;
        Ok(Some(copy))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Programs::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn statistics(&self) -> Result<MediaStatistics> {
        let count = Programs::find().count(&self.conn).await?;
        let media_count: Option<i64> = Programs::find()
            .select_only()
            .column_as(programs::Column::MediaCount.sum(), "media_count")
            .into_tuple()
            .one(&self.conn)
            .await?
            .flatten();

        Ok(MediaStatistics {
            count,
            media_count: media_count.unwrap_or_default(),
        })
    }
}
