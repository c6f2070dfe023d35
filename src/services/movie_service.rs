//! Domain service for movies and their ordered media.

use crate::domain::{Filter, Page};
use crate::models::movie::{Movie, MovieInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Movie>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Movie, CatalogError>;

    async fn create(&self, input: MovieInput) -> Result<Movie, CatalogError>;

    /// Replaces the movie. Media are merged by position, so the leading
    /// media keep their ids.
    async fn update(&self, id: i32, input: MovieInput) -> Result<Movie, CatalogError>;

    /// Copies the movie including genres; media are created afresh.
    async fn duplicate(&self, id: i32) -> Result<Movie, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
