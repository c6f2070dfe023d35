use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::music::{Music, MusicInput};
use crate::services::music_service::MusicService;
use crate::services::{CatalogError, rules};
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Music";

pub struct SeaOrmMusicService {
    store: Store,
}

impl SeaOrmMusicService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn validate(input: &MusicInput) -> Result<(), CatalogError> {
    rules::require_text("name", &input.name)?;
    rules::require_positive("media_count", input.media_count)?;
    rules::optional_text("note", input.note.as_deref())
}

#[async_trait]
impl MusicService for SeaOrmMusicService {
    async fn list(&self, filter: &Filter) -> Result<Page<Music>, CatalogError> {
        Ok(self.store.music().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Music, CatalogError> {
        self.store
            .music()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, input: MusicInput) -> Result<Music, CatalogError> {
        validate(&input)?;
        let music = self.store.music().create(&input).await?;
        info!(id = music.id, name = %music.name, "Music created");
        Ok(music)
    }

    async fn update(&self, id: i32, input: MusicInput) -> Result<Music, CatalogError> {
        validate(&input)?;
        self.store
            .music()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Music, CatalogError> {
        self.store
            .music()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.music().delete(id).await? {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        info!(id, "Music deleted");
        Ok(())
    }
}
