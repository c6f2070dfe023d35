use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::{Filter, Page};
use crate::entities::{authors, book_authors, prelude::*};
use crate::models::author::{Author, AuthorInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

impl From<authors::Model> for Author {
    fn from(model: authors::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
        }
    }
}

impl From<Author> for AuthorInput {
    fn from(author: Author) -> Self {
        Self {
            first_name: author.first_name,
            middle_name: author.middle_name,
            last_name: author.last_name,
        }
    }
}

pub struct AuthorRepository {
    conn: DatabaseConnection,
}

impl AuthorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Author>> {
        let mut query = Authors::find()
            .order_by_asc(authors::Column::NormalizedName)
            .order_by_asc(authors::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                authors::Column::NormalizedName,
                &[
                    authors::Column::FirstName,
                    authors::Column::MiddleName,
                    authors::Column::LastName,
                ],
                name,
            ));
        }

        let page = fetch_page(&self.conn, query, filter.paging).await?;
        Ok(page.map(Author::from))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Author>> {
        let author = Authors::find_by_id(id).one(&self.conn).await?;
        Ok(author.map(Author::from))
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let authors = Authors::find()
            .filter(authors::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(authors::Column::NormalizedName)
            .all(&self.conn)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    pub async fn create(&self, input: &AuthorInput) -> Result<Author> {
        let timestamp = now();
        let model = authors::ActiveModel {
            first_name: Set(input.first_name.clone()),
            middle_name: Set(input.middle_name.clone()),
            last_name: Set(input.last_name.clone()),
            normalized_name: Set(normalize(&input.sort_name())),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model.into())
    }

    pub async fn update(&self, id: i32, input: &AuthorInput) -> Result<Option<Author>> {
        let Some(existing) = Authors::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: authors::ActiveModel = existing.into();
        active.first_name = Set(input.first_name.clone());
        active.middle_name = Set(input.middle_name.clone());
        active.last_name = Set(input.last_name.clone());
        active.normalized_name = Set(normalize(&input.sort_name()));
        active.updated_at = Set(now());
        let model = active.update(&self.conn).await?;

        Ok(Some(model.into()))
    }

    pub async fn duplicate(&self, id: i32) -> Result<Option<Author>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let copy = self.create(&existing.into()).await?;
        Ok(Some(copy))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Authors::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Whether any book lists the author.
    pub async fn is_used(&self, id: i32) -> Result<bool> {
        let count = BookAuthors::find()
            .filter(book_authors::Column::AuthorId.eq(id))
            .count(&self.conn)
            .await?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Authors::find().count(&self.conn).await?)
    }
}
