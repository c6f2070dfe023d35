use super::now;
use crate::domain::{Page, Paging};
use crate::entities::{games, movies, pictures, prelude::*, shows};
use crate::models::picture::Picture;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl From<pictures::Model> for Picture {
    fn from(model: pictures::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
        }
    }
}

pub struct PictureRepository {
    conn: DatabaseConnection,
}

impl PictureRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Lists picture ids only; content is fetched one picture at a time.
    pub async fn list_ids(&self, paging: Paging) -> Result<Page<i32>> {
        let total = Pictures::find().count(&self.conn).await?;
        let offset = paging.page.saturating_sub(1) * paging.limit;

        let ids: Vec<i32> = Pictures::find()
            .select_only()
            .column(pictures::Column::Id)
            .order_by_asc(pictures::Column::Id)
            .offset(offset)
            .limit(paging.limit)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(Page::new(ids, paging, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Picture>> {
        let picture = Pictures::find_by_id(id).one(&self.conn).await?;
        Ok(picture.map(Picture::from))
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Pictures::find()
            .filter(pictures::Column::Id.eq(id))
            .count(&self.conn)
            .await?;

        Ok(count > 0)
    }

    pub async fn create(&self, content: Vec<u8>) -> Result<Picture> {
        let timestamp = now();
        let model = pictures::ActiveModel {
            content: Set(content),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model.into())
    }

    pub async fn update(&self, id: i32, content: Vec<u8>) -> Result<Option<Picture>> {
        let Some(existing) = Pictures::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: pictures::ActiveModel = existing.into();
        active.content = Set(content);
        active.updated_at = Set(now());
        let model = active.update(&self.conn).await?;

        Ok(Some(model.into()))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Pictures::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Whether a movie, show or game points at the picture.
    pub async fn is_used(&self, id: i32) -> Result<bool> {
        let movies = Movies::find()
            .filter(movies::Column::PictureId.eq(id))
            .count(&self.conn)
            .await?;
        let shows = Shows::find()
            .filter(shows::Column::PictureId.eq(id))
            .count(&self.conn)
            .await?;
        let games = Games::find()
            .filter(games::Column::PictureId.eq(id))
            .count(&self.conn)
            .await?;

        Ok(movies + shows + games > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Pictures::find().count(&self.conn).await?)
    }
}
