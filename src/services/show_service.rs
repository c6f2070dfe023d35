//! Domain service for shows and their seasons.
//!
//! Seasons are addressed through their show: a season id that belongs to
//! another show is reported as missing.

use crate::domain::{Filter, Page};
use crate::models::show::{Season, SeasonInput, Show, ShowInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait ShowService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Show>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Show, CatalogError>;

    async fn create(&self, input: ShowInput) -> Result<Show, CatalogError>;

    async fn update(&self, id: i32, input: ShowInput) -> Result<Show, CatalogError>;

    /// Deep copy: seasons and episodes are copied as new rows.
    async fn duplicate(&self, id: i32) -> Result<Show, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;

    async fn list_seasons(&self, show_id: i32) -> Result<Vec<Season>, CatalogError>;

    async fn get_season(&self, show_id: i32, season_id: i32) -> Result<Season, CatalogError>;

    /// Appends the season at the next position.
    async fn add_season(&self, show_id: i32, input: SeasonInput) -> Result<Season, CatalogError>;

    /// Episodes are merged by position.
    async fn update_season(
        &self,
        show_id: i32,
        season_id: i32,
        input: SeasonInput,
    ) -> Result<Season, CatalogError>;

    /// Positions of the remaining seasons are renumbered.
    async fn remove_season(&self, show_id: i32, season_id: i32) -> Result<(), CatalogError>;
}
