use crate::domain::{Filter, Page};
use crate::models::music::{Music, MusicInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait MusicService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Music>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Music, CatalogError>;

    async fn create(&self, input: MusicInput) -> Result<Music, CatalogError>;

    async fn update(&self, id: i32, input: MusicInput) -> Result<Music, CatalogError>;

    async fn duplicate(&self, id: i32) -> Result<Music, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
