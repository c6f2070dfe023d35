use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::show::{Season, SeasonInput, Show, ShowInput};
use crate::services::CatalogError;
use crate::services::rules::{self, LANGUAGES, SUBTITLES};
use crate::services::show_service::ShowService;
use async_trait::async_trait;
use tracing::info;

const SHOW: &str = "Show";
const SEASON: &str = "Season";

pub struct SeaOrmShowService {
    store: Store,
}

impl SeaOrmShowService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn validate_show(&self, input: &ShowInput) -> Result<(), CatalogError> {
        rules::require_text("czech_name", &input.czech_name)?;
        rules::require_text("original_name", &input.original_name)?;
        rules::validate_imdb_code(input.imdb_code.as_deref())?;
        rules::optional_text("note", input.note.as_deref())?;

        rules::ensure_genres(&self.store, &input.genres).await?;
        rules::ensure_picture(&self.store, input.picture).await
    }

    async fn validate_season(&self, input: &SeasonInput) -> Result<(), CatalogError> {
        rules::require_positive("number", input.number)?;
        rules::validate_year("start_year", input.start_year)?;
        rules::validate_year("end_year", input.end_year)?;
        if input.start_year > input.end_year {
            return Err(CatalogError::validation(format!(
                "start_year {} is after end_year {}",
                input.start_year, input.end_year
            )));
        }
        rules::optional_text("note", input.note.as_deref())?;

        for episode in &input.episodes {
            rules::require_positive("episode number", episode.number)?;
            rules::require_text("episode name", &episode.name)?;
            rules::require_positive("episode length", episode.length)?;
            rules::optional_text("episode note", episode.note.as_deref())?;
        }

        rules::ensure_code(&self.store, LANGUAGES, &input.language).await?;
        rules::ensure_codes(&self.store, SUBTITLES, &input.subtitles).await
    }

    async fn ensure_show(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.shows().exists(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(SHOW, id))
        }
    }
}

#[async_trait]
impl ShowService for SeaOrmShowService {
    async fn list(&self, filter: &Filter) -> Result<Page<Show>, CatalogError> {
        Ok(self.store.shows().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Show, CatalogError> {
        self.store
            .shows()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(SHOW, id))
    }

    async fn create(&self, input: ShowInput) -> Result<Show, CatalogError> {
        self.validate_show(&input).await?;
        let show = self.store.shows().create(&input).await?;
        info!(id = show.id, name = %show.czech_name, "Show created");
        Ok(show)
    }

    async fn update(&self, id: i32, input: ShowInput) -> Result<Show, CatalogError> {
        self.ensure_show(id).await?;
        self.validate_show(&input).await?;

        self.store
            .shows()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(SHOW, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Show, CatalogError> {
        let copy = self
            .store
            .shows()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(SHOW, id))?;

        info!(source = id, id = copy.id, "Show duplicated");
        Ok(copy)
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.shows().delete(id).await? {
            return Err(CatalogError::not_found(SHOW, id));
        }
        info!(id, "Show deleted");
        Ok(())
    }

    async fn list_seasons(&self, show_id: i32) -> Result<Vec<Season>, CatalogError> {
        self.ensure_show(show_id).await?;
        Ok(self.store.shows().list_seasons(show_id).await?)
    }

    async fn get_season(&self, show_id: i32, season_id: i32) -> Result<Season, CatalogError> {
        self.ensure_show(show_id).await?;
        self.store
            .shows()
            .get_season(show_id, season_id)
            .await?
            .ok_or(CatalogError::not_found(SEASON, season_id))
    }

    async fn add_season(&self, show_id: i32, input: SeasonInput) -> Result<Season, CatalogError> {
        self.ensure_show(show_id).await?;
        self.validate_season(&input).await?;

        let season = self.store.shows().add_season(show_id, &input).await?;
        info!(show_id, id = season.id, position = season.position, "Season added");
        Ok(season)
    }

    async fn update_season(
        &self,
        show_id: i32,
        season_id: i32,
        input: SeasonInput,
    ) -> Result<Season, CatalogError> {
        self.ensure_show(show_id).await?;
        self.validate_season(&input).await?;

        self.store
            .shows()
            .update_season(show_id, season_id, &input)
            .await?
            .ok_or(CatalogError::not_found(SEASON, season_id))
    }

    async fn remove_season(&self, show_id: i32, season_id: i32) -> Result<(), CatalogError> {
        self.ensure_show(show_id).await?;

        if !self.store.shows().remove_season(show_id, season_id).await? {
            return Err(CatalogError::not_found(SEASON, season_id));
        }
        info!(show_id, id = season_id, "Season removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::genre::GenreInput;
    use crate::models::show::EpisodeInput;

    async fn service_with_show() -> (SeaOrmShowService, i32) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let genre = store
            .genres()
            .create(&GenreInput {
                name: "Drama".to_string(),
            })
            .await
            .unwrap();
        let service = SeaOrmShowService::new(store);
        let show = service
            .create(ShowInput {
                czech_name: "Dr. House".to_string(),
                original_name: "House M.D.".to_string(),
                imdb_code: Some("tt0412142".to_string()),
                note: None,
                picture: None,
                genres: vec![genre.id],
            })
            .await
            .unwrap();
        (service, show.id)
    }

    fn season(number: i32, episodes: usize) -> SeasonInput {
        SeasonInput {
            number,
            start_year: 2004,
            end_year: 2005,
            language: "EN".to_string(),
            subtitles: vec!["CZ".to_string()],
            note: None,
            episodes: (1..=episodes)
                .map(|n| EpisodeInput {
                    number: i32::try_from(n).unwrap(),
                    name: format!("Episode {n}"),
                    length: 44,
                    note: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn seasons_are_validated() {
        let (service, show) = service_with_show().await;

        let mut reversed = season(1, 1);
        reversed.start_year = 2006;
        let mut nameless = season(1, 1);
        nameless.episodes[0].name = String::new();
        let mut zero = season(0, 1);
        zero.episodes.clear();

        for input in [reversed, nameless, zero] {
            assert!(matches!(
                service.add_season(show, input).await.unwrap_err(),
                CatalogError::Validation(_)
            ));
        }
    }

    #[tokio::test]
    async fn seasons_of_missing_show_are_not_found() {
        let (service, _) = service_with_show().await;
        let err = service.add_season(99, season(1, 2)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Show", .. }));

        let err = service.list_seasons(99).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Show", .. }));
    }

    #[tokio::test]
    async fn season_lifecycle_updates_counts() {
        let (service, show) = service_with_show().await;

        let first = service.add_season(show, season(1, 3)).await.unwrap();
        let second = service.add_season(show, season(2, 2)).await.unwrap();
        assert_eq!((first.position, second.position), (1, 2));

        let summary = service.get(show).await.unwrap();
        assert_eq!(summary.seasons_count, 2);
        assert_eq!(summary.episodes_count, 5);

        service.remove_season(show, first.id).await.unwrap();
        let remaining = service.list_seasons(show).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].position, 1);

        let err = service.get_season(show, first.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Season", .. }));
    }
}
