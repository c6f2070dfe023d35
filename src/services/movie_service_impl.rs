use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::movie::{Movie, MovieInput};
use crate::services::movie_service::MovieService;
use crate::services::rules::{self, LANGUAGES, SUBTITLES};
use crate::services::CatalogError;
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Movie";

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn validate(&self, input: &MovieInput) -> Result<(), CatalogError> {
        rules::require_text("czech_name", &input.czech_name)?;
        rules::require_text("original_name", &input.original_name)?;
        rules::validate_year("year", input.year)?;
        rules::validate_imdb_code(input.imdb_code.as_deref())?;
        rules::optional_text("note", input.note.as_deref())?;

        rules::require_non_empty("media", &input.media)?;
        for length in &input.media {
            rules::require_positive("media length", *length)?;
        }

        rules::ensure_code(&self.store, LANGUAGES, &input.language).await?;
        rules::ensure_codes(&self.store, SUBTITLES, &input.subtitles).await?;
        rules::ensure_genres(&self.store, &input.genres).await?;
        rules::ensure_picture(&self.store, input.picture).await
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self, filter: &Filter) -> Result<Page<Movie>, CatalogError> {
        Ok(self.store.movies().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, CatalogError> {
        self.store
            .movies()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, input: MovieInput) -> Result<Movie, CatalogError> {
        self.validate(&input).await?;
        let movie = self.store.movies().create(&input).await?;
        info!(id = movie.id, name = %movie.czech_name, "Movie created");
        Ok(movie)
    }

    async fn update(&self, id: i32, input: MovieInput) -> Result<Movie, CatalogError> {
        if self.store.movies().get(id).await?.is_none() {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        self.validate(&input).await?;

        self.store
            .movies()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Movie, CatalogError> {
        let copy = self
            .store
            .movies()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))?;

        info!(source = id, id = copy.id, "Movie duplicated");
        Ok(copy)
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.movies().delete(id).await? {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        info!(id, "Movie deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::genre::GenreInput;

    async fn service_with_genre() -> (SeaOrmMovieService, i32) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let genre = store
            .genres()
            .create(&GenreInput {
                name: "Sci-fi".to_string(),
            })
            .await
            .unwrap();
        (SeaOrmMovieService::new(store), genre.id)
    }

    fn input(genre: i32) -> MovieInput {
        MovieInput {
            czech_name: "Vetřelec".to_string(),
            original_name: "Alien".to_string(),
            year: 1979,
            language: "EN".to_string(),
            subtitles: vec!["CZ".to_string()],
            media: vec![117],
            imdb_code: Some("tt0078748".to_string()),
            note: None,
            picture: None,
            genres: vec![genre],
        }
    }

    #[tokio::test]
    async fn valid_movie_is_created() {
        let (service, genre) = service_with_genre().await;
        let movie = service.create(input(genre)).await.unwrap();

        assert_eq!(movie.media.len(), 1);
        assert_eq!(movie.genres[0].id, genre);
        assert_eq!(movie.length(), 117);
    }

    #[tokio::test]
    async fn rejects_invalid_fields() {
        let (service, genre) = service_with_genre().await;

        let mut early = input(genre);
        early.year = 1900;
        let mut bad_language = input(genre);
        bad_language.language = "XX".to_string();
        let mut no_media = input(genre);
        no_media.media.clear();
        let mut zero_length = input(genre);
        zero_length.media = vec![90, 0];
        let mut unknown_genre = input(genre);
        unknown_genre.genres = vec![genre + 100];
        let mut missing_picture = input(genre);
        missing_picture.picture = Some(42);
        let mut bad_imdb = input(genre);
        bad_imdb.imdb_code = Some("nm0000001".to_string());

        for movie in [
            early,
            bad_language,
            no_media,
            zero_length,
            unknown_genre,
            missing_picture,
            bad_imdb,
        ] {
            assert!(matches!(
                service.create(movie).await.unwrap_err(),
                CatalogError::Validation(_)
            ));
        }
    }

    #[tokio::test]
    async fn update_of_missing_movie_is_not_found() {
        let (service, genre) = service_with_genre().await;
        let err = service.update(7, input(genre)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Movie", id: 7 }));
    }
}
