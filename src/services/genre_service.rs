use crate::domain::{Filter, Page};
use crate::models::genre::{Genre, GenreInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait GenreService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Genre>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Genre, CatalogError>;

    async fn create(&self, input: GenreInput) -> Result<Genre, CatalogError>;

    async fn update(&self, id: i32, input: GenreInput) -> Result<Genre, CatalogError>;

    async fn duplicate(&self, id: i32) -> Result<Genre, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] while a movie, show or book uses it.
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
