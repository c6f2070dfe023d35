use crate::domain::{Filter, Page};
use crate::models::author::{Author, AuthorInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait AuthorService: Send + Sync {
    /// Lists authors ordered by last name, then first name.
    async fn list(&self, filter: &Filter) -> Result<Page<Author>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Author, CatalogError>;

    async fn create(&self, input: AuthorInput) -> Result<Author, CatalogError>;

    async fn update(&self, id: i32, input: AuthorInput) -> Result<Author, CatalogError>;

    async fn duplicate(&self, id: i32) -> Result<Author, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] while a book references the author.
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
