use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::game::{Cheat, CheatInput, Game, GameInput};
use crate::services::game_service::GameService;
use crate::services::rules::{self, FORMATS};
use crate::services::CatalogError;
use async_trait::async_trait;
use tracing::info;

const GAME: &str = "Game";
const CHEAT: &str = "Cheat";

pub struct SeaOrmGameService {
    store: Store,
}

impl SeaOrmGameService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn validate(&self, input: &GameInput) -> Result<(), CatalogError> {
        rules::require_text("name", &input.name)?;
        rules::require_positive("media_count", input.media_count)?;
        rules::optional_text("note", input.note.as_deref())?;

        rules::ensure_code(&self.store, FORMATS, &input.format).await?;
        rules::ensure_picture(&self.store, input.picture).await
    }

    async fn ensure_game(&self, id: i32) -> Result<(), CatalogError> {
        match self.store.games().get(id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::not_found(GAME, id)),
        }
    }
}

fn validate_cheat(input: &CheatInput) -> Result<(), CatalogError> {
    rules::optional_text("game_setting", input.game_setting.as_deref())?;
    rules::optional_text("cheat_setting", input.cheat_setting.as_deref())?;
    rules::require_non_empty("data", &input.data)?;

    for datum in &input.data {
        rules::require_text("action", &datum.action)?;
        rules::require_text("description", &datum.description)?;
    }
    Ok(())
}

#[async_trait]
impl GameService for SeaOrmGameService {
    async fn list(&self, filter: &Filter) -> Result<Page<Game>, CatalogError> {
        Ok(self.store.games().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Game, CatalogError> {
        self.store
            .games()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(GAME, id))
    }

    async fn create(&self, input: GameInput) -> Result<Game, CatalogError> {
        self.validate(&input).await?;
        let game = self.store.games().create(&input).await?;
        info!(id = game.id, name = %game.name, "Game created");
        Ok(game)
    }

    async fn update(&self, id: i32, input: GameInput) -> Result<Game, CatalogError> {
        self.ensure_game(id).await?;
        self.validate(&input).await?;

        self.store
            .games()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(GAME, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Game, CatalogError> {
        let copy = self
            .store
            .games()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(GAME, id))?;

        info!(source = id, id = copy.id, "Game duplicated");
        Ok(copy)
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.games().delete(id).await? {
            return Err(CatalogError::not_found(GAME, id));
        }
        info!(id, "Game deleted");
        Ok(())
    }

    async fn get_cheat(&self, game_id: i32) -> Result<Cheat, CatalogError> {
        self.ensure_game(game_id).await?;
        self.store
            .games()
            .get_cheat(game_id)
            .await?
            .ok_or(CatalogError::not_found(CHEAT, game_id))
    }

    async fn put_cheat(&self, game_id: i32, input: CheatInput) -> Result<Cheat, CatalogError> {
        self.ensure_game(game_id).await?;
        validate_cheat(&input)?;

        let cheat = self.store.games().put_cheat(game_id, &input).await?;
        info!(game_id, rows = cheat.data.len(), "Cheat saved");
        Ok(cheat)
    }

    async fn remove_cheat(&self, game_id: i32) -> Result<(), CatalogError> {
        self.ensure_game(game_id).await?;

        if !self.store.games().remove_cheat(game_id).await? {
            return Err(CatalogError::not_found(CHEAT, game_id));
        }
        info!(game_id, "Cheat removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::CheatDatumInput;

    fn game(format: &str) -> GameInput {
        GameInput {
            name: "Half-Life".to_string(),
            media_count: 1,
            format: format.to_string(),
            crack: false,
            serial_key: true,
            patch: false,
            note: None,
            picture: None,
        }
    }

    fn cheat(actions: &[&str]) -> CheatInput {
        CheatInput {
            game_setting: None,
            cheat_setting: Some("~".to_string()),
            data: actions
                .iter()
                .map(|a| CheatDatumInput {
                    action: (*a).to_string(),
                    description: format!("does {a}"),
                })
                .collect(),
        }
    }

    async fn service() -> SeaOrmGameService {
        SeaOrmGameService::new(Store::new("sqlite::memory:").await.unwrap())
    }

    #[tokio::test]
    async fn format_must_be_registered() {
        let service = service().await;
        assert!(service.create(game("STEAM")).await.is_ok());
        assert!(matches!(
            service.create(game("FLOPPY")).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn cheat_lifecycle() {
        let service = service().await;
        let created = service.create(game("STEAM")).await.unwrap();

        let err = service.get_cheat(created.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Cheat", .. }));

        let first = service.put_cheat(created.id, cheat(&["god", "noclip"])).await.unwrap();
        let second = service.put_cheat(created.id, cheat(&["impulse 101"])).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.data.len(), 1);
        assert_eq!(second.data[0].id, first.data[0].id);
        assert!(service.get(created.id).await.unwrap().has_cheat);

        service.remove_cheat(created.id).await.unwrap();
        assert!(!service.get(created.id).await.unwrap().has_cheat);
    }

    #[tokio::test]
    async fn blank_cheat_action_is_rejected() {
        let service = service().await;
        let created = service.create(game("GOG")).await.unwrap();
        assert!(matches!(
            service.put_cheat(created.id, cheat(&[" "])).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
        assert!(matches!(
            service.put_cheat(created.id + 1, cheat(&["god"])).await.unwrap_err(),
            CatalogError::NotFound { entity: "Game", .. }
        ));
    }
}
