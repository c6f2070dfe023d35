use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::{Filter, Page};
use crate::entities::{genres, prelude::*};
use crate::models::genre::{Genre, GenreInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Genre>> {
        let mut query = Genres::find()
            .order_by_asc(genres::Column::NormalizedName)
            .order_by_asc(genres::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                genres::Column::NormalizedName,
                &[genres::Column::Name],
                name,
            ));
        }

        let page = fetch_page(&self.conn, query, filter.paging).await?;
        Ok(page.map(Genre::from))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Genre>> {
        let genre = Genres::find_by_id(id).one(&self.conn).await?;
        Ok(genre.map(Genre::from))
    }

    /// Loads the genres with the given ids, ordered by name.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let genres = Genres::find()
            .filter(genres::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(genres::Column::NormalizedName)
            .all(&self.conn)
            .await?;

        Ok(genres.into_iter().map(Genre::from).collect())
    }

    pub async fn create(&self, input: &GenreInput) -> Result<Genre> {
        let timestamp = now();
        let model = genres::ActiveModel {
            name: Set(input.name.clone()),
            normalized_name: Set(normalize(&input.name)),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model.into())
    }

    pub async fn update(&self, id: i32, input: &GenreInput) -> Result<Option<Genre>> {
        let Some(existing) = Genres::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: genres::ActiveModel = existing.into();
        active.name = Set(input.name.clone());
        active.normalized_name = Set(normalize(&input.name));
        active.updated_at = Set(now());
        let model = active.update(&self.conn).await?;

        Ok(Some(model.into()))
    }

    pub async fn duplicate(&self, id: i32) -> Result<Option<Genre>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let copy = self.create(&GenreInput { name: existing.name }).await?;
        Ok(Some(copy))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Genres::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Whether any movie, show or book references the genre.
    pub async fn is_used(&self, id: i32) -> Result<bool> {
        use crate::entities::{book_genres, movie_genres, show_genres};

        let movies = MovieGenres::find()
            .filter(movie_genres::Column::GenreId.eq(id))
            .count(&self.conn)
            .await?;
        let shows = ShowGenres::find()
            .filter(show_genres::Column::GenreId.eq(id))
            .count(&self.conn)
            .await?;
        let books = BookGenres::find()
            .filter(book_genres::Column::GenreId.eq(id))
            .count(&self.conn)
            .await?;

        Ok(movies + shows + books > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Genres::find().count(&self.conn).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Store;
    use crate::domain::{Filter, Paging};
    use crate::models::genre::GenreInput;

    fn by_name(name: &str) -> Filter {
        Filter {
            name: Some(name.to_string()),
            paging: Paging::new(1, 20),
        }
    }

    #[tokio::test]
    async fn name_search_folds_case_of_accented_letters() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let repo = store.genres();
        for name in ["Životopis", "Drama", "Пародия"] {
            repo.create(&GenreInput {
                name: name.to_string(),
            })
            .await
            .unwrap();
        }

        for query in ["životopis", "ŽIVOTOPIS", "ivoto", "Životopis"] {
            let page = repo.list(&by_name(query)).await.unwrap();
            assert_eq!(page.total, 1, "query {query}");
            assert_eq!(page.data[0].name, "Životopis");
        }

        let page = repo.list(&by_name("пародия")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "Пародия");

        let page = repo.list(&by_name("DRA")).await.unwrap();
        assert_eq!(page.total, 1);

        assert_eq!(repo.list(&by_name("zivotopis")).await.unwrap().total, 0);
    }
}
