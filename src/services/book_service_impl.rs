use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::book::{Book, BookInput};
use crate::services::book_service::BookService;
use crate::services::{CatalogError, rules};
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Book";

pub struct SeaOrmBookService {
    store: Store,
}

impl SeaOrmBookService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn validate(&self, input: &BookInput) -> Result<(), CatalogError> {
        rules::require_text("czech_name", &input.czech_name)?;
        rules::require_text("original_name", &input.original_name)?;
        rules::optional_text("note", input.note.as_deref())?;
        if let Some(year) = input.issue_year {
            rules::require_positive("issue_year", year)?;
        }

        rules::ensure_authors(&self.store, &input.authors).await?;
        rules::ensure_genres(&self.store, &input.genres).await
    }
}

#[async_trait]
impl BookService for SeaOrmBookService {
    async fn list(&self, filter: &Filter) -> Result<Page<Book>, CatalogError> {
        Ok(self.store.books().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Book, CatalogError> {
        self.store
            .books()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, input: BookInput) -> Result<Book, CatalogError> {
        self.validate(&input).await?;
        let book = self.store.books().create(&input).await?;
        info!(id = book.id, name = %book.czech_name, "Book created");
        Ok(book)
    }

    async fn update(&self, id: i32, input: BookInput) -> Result<Book, CatalogError> {
        if self.store.books().get(id).await?.is_none() {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        self.validate(&input).await?;

        self.store
            .books()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Book, CatalogError> {
        self.store
            .books()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.books().delete(id).await? {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        info!(id, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::author::AuthorInput;
    use crate::models::genre::GenreInput;

    #[tokio::test]
    async fn book_needs_existing_authors_and_genres() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let author = store
            .authors()
            .create(&AuthorInput {
                first_name: "Karel".to_string(),
                middle_name: None,
                last_name: "Čapek".to_string(),
            })
            .await
            .unwrap();
        let genre = store
            .genres()
            .create(&GenreInput {
                name: "Drama".to_string(),
            })
            .await
            .unwrap();
        let service = SeaOrmBookService::new(store);

        let input = BookInput {
            czech_name: "R.U.R.".to_string(),
            original_name: "R.U.R.".to_string(),
            issue_year: Some(1920),
            note: None,
            authors: vec![author.id],
            genres: vec![genre.id],
        };

        let missing_author = BookInput {
            authors: vec![author.id + 1],
            ..input.clone()
        };
        assert!(matches!(
            service.create(missing_author).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let no_genres = BookInput {
            genres: Vec::new(),
            ..input.clone()
        };
        assert!(matches!(
            service.create(no_genres).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let book = service.create(input).await.unwrap();
        assert_eq!(book.authors[0].last_name, "Čapek");
        assert_eq!(book.genres[0].name, "Drama");
    }
}
