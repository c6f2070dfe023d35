//! Domain service for games and their single cheat sheet.

use crate::domain::{Filter, Page};
use crate::models::game::{Cheat, CheatInput, Game, GameInput};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    async fn list(&self, filter: &Filter) -> Result<Page<Game>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Game, CatalogError>;

    async fn create(&self, input: GameInput) -> Result<Game, CatalogError>;

    async fn update(&self, id: i32, input: GameInput) -> Result<Game, CatalogError>;

    /// Copies the game and its cheat.
    async fn duplicate(&self, id: i32) -> Result<Game, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;

    async fn get_cheat(&self, game_id: i32) -> Result<Cheat, CatalogError>;

    /// Creates the cheat or replaces it, merging cheat data by position.
    async fn put_cheat(&self, game_id: i32, input: CheatInput) -> Result<Cheat, CatalogError>;

    async fn remove_cheat(&self, game_id: i32) -> Result<(), CatalogError>;
}
