use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::{Filter, Page};
use crate::entities::{music, prelude::*};
use crate::models::music::{Music as MusicItem, MusicInput};
use crate::models::statistics::MediaStatistics;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl From<music::Model> for MusicItem {
    fn from(model: music::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            media_count: model.media_count,
            note: model.note,
        }
    }
}

impl From<MusicItem> for MusicInput {
    fn from(item: MusicItem) -> Self {
        Self {
            name: item.name,
            media_count: item.media_count,
            note: item.note,
        }
    }
}

pub struct MusicRepository {
    conn: DatabaseConnection,
}

impl MusicRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<MusicItem>> {
        let mut query = Music::find()
            .order_by_asc(music::Column::NormalizedName)
            .order_by_asc(music::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                music::Column::NormalizedName,
                &[music::Column::Name],
                name,
            ));
        }

        let page = fetch_page(&self.conn, query, filter.paging).await?;
        Ok(page.map(MusicItem::from))
    }

    pub async fn get(&self, id: i32) -> Result<Option<MusicItem>> {
        let item = Music::find_by_id(id).one(&self.conn).await?;
        Ok(item.map(MusicItem::from))
    }

    pub async fn create(&self, input: &MusicInput) -> Result<MusicItem> {
        let timestamp = now();
        let model = music::ActiveModel {
            name: Set(input.name.clone()),
            normalized_name: Set(normalize(&input.name)),
            media_count: Set(input.media_count),
            note: Set(input.note.clone()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model.into())
    }

    pub async fn update(&self, id: i32, input: &MusicInput) -> Result<Option<MusicItem>> {
        let Some(existing) = Music::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: music::ActiveModel = existing.into();
        active.name = Set(input.name.clone());
        active.normalized_name = Set(normalize(&input.name));
        active.media_count = Set(input.media_count);
        active.note = Set(input.note.clone());
        active.updated_at = Set(now());
        let model = active.update(&self.conn).await?;

        Ok(Some(model.into()))
    }

    pub async fn duplicate(&self, id: i32) -> Result<Option<MusicItem>> {
        let Some(item) = self.get(id).await? else {
            return Ok(None);
        };

        let copy = self.create(&item.into()).await?;
        Ok(Some(copy))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Music::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn statistics(&self) -> Result<MediaStatistics> {
        let count = Music::find().count(&self.conn).await?;
        let media_count: Option<i64> = Music::find()
            .select_only()
            .column_as(music::Column::MediaCount.sum(), "media_count")
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
