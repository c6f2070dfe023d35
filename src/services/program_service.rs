use crate::domain::{Filter, Page};
use crate::models::program::{Program, ProgramInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait ProgramService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Program>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Program, CatalogError>;

    async fn create(&self, input: ProgramInput) -> Result<Program, CatalogError>;

    async fn update(&self, id: i32, input: ProgramInput) -> Result<Program, CatalogError>;

    async fn duplicate(&self, id: i32) -> Result<Program, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
