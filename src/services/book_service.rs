use crate::domain::{Filter, Page};
use crate::models::book::{Book, BookInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait BookService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Book>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Book, CatalogError>;

    async fn create(&self, input: BookInput) -> Result<Book, CatalogError>;

    async fn update(&self, id: i32, input: BookInput) -> Result<Book, CatalogError>;

    async fn duplicate(&self, id: i32) -> Result<Book, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
