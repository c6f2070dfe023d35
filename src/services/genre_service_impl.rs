use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::genre::{Genre, GenreInput};
use crate::services::genre_service::GenreService;
use crate::services::{CatalogError, rules};
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Genre";

pub struct SeaOrmGenreService {
    store: Store,
}

impl SeaOrmGenreService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn validate(input: &GenreInput) -> Result<(), CatalogError> {
    rules::require_text("name", &input.name)
}

#[async_trait]
impl GenreService for SeaOrmGenreService {
    async fn list(&self, filter: &Filter) -> Result<Page<Genre>, CatalogError> {
        Ok(self.store.genres().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Genre, CatalogError> {
        self.store
            .genres()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, input: GenreInput) -> Result<Genre, CatalogError> {
        validate(&input)?;
        let genre = self.store.genres().create(&input).await?;
        info!(id = genre.id, name = %genre.name, "Genre created");
        Ok(genre)
    }

    async fn update(&self, id: i32, input: GenreInput) -> Result<Genre, CatalogError> {
        validate(&input)?;
        self.store
            .genres()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Genre, CatalogError> {
        self.store
            .genres()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let repo = self.store.genres();
        if repo.get(id).await?.is_none() {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        if repo.is_used(id).await? {
            return Err(CatalogError::conflict(format!(
                "Genre {id} is still assigned to a movie, show or book"
            )));
        }

        repo.delete(id).await?;
        info!(id, "Genre deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Paging;

    async fn service() -> SeaOrmGenreService {
        SeaOrmGenreService::new(Store::new("sqlite::memory:").await.unwrap())
    }

    fn input(name: &str) -> GenreInput {
        GenreInput {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn crud_cycle() {
        let service = service().await;

        let genre = service.create(input("Drama")).await.unwrap();
        let renamed = service.update(genre.id, input("Sci-fi")).await.unwrap();
        assert_eq!(renamed.name, "Sci-fi");

        let copy = service.duplicate(genre.id).await.unwrap();
        assert_ne!(copy.id, genre.id);
        assert_eq!(copy.name, "Sci-fi");

        service.delete(genre.id).await.unwrap();
        let err = service.get(genre.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Genre", .. }));

        let page = service
            .list(&Filter {
                name: None,
                paging: Paging::new(1, 10),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = service().await;
        let err = service.create(input("  ")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_genre_is_not_found() {
        let service = service().await;
        assert!(matches!(
            service.update(99, input("x")).await.unwrap_err(),
            CatalogError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete(99).await.unwrap_err(),
            CatalogError::NotFound { .. }
        ));
    }
}
