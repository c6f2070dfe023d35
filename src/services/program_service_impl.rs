use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::program::{Program, ProgramInput};
use crate::services::program_service::ProgramService;
use crate::services::rules::{self, FORMATS};
use crate::services::CatalogError;
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Program";

pub struct SeaOrmProgramService {
    store: Store,
}

impl SeaOrmProgramService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn validate(&self, input: &ProgramInput) -> Result<(), CatalogError> {
        rules::require_text("name", &input.name)?;
        rules::require_positive("media_count", input.media_count)?;
        rules::optional_text("note", input.note.as_deref())?;
        rules::ensure_code(&self.store, FORMATS, &input.format).await
    }
}

#[async_trait]
impl ProgramService for SeaOrmProgramService {
    async fn list(&self, filter: &Filter) -> Result<Page<Program>, CatalogError> {
        Ok(self.store.programs().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Program, CatalogError> {
        self.store
            .programs()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, input: ProgramInput) -> Result<Program, CatalogError> {
        self.validate(&input).await?;
        let program = self.store.programs().create(&input).await?;
        info!(id = program.id, name = %program.name, "Program created");
        Ok(program)
    }

    async fn update(&self, id: i32, input: ProgramInput) -> Result<Program, CatalogError> {
        self.validate(&input).await?;
        self.store
            .programs()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Program, CatalogError> {
        self.store
            .programs()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.programs().delete(id).await? {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        info!(id, "Program deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn program_round_trip() {
        let service = SeaOrmProgramService::new(Store::new("sqlite::memory:").await.unwrap());
        let input = ProgramInput {
            name: "Photoshop".to_string(),
            media_count: 2,
            format: "ISO".to_string(),
            crack: false,
            serial_key: true,
            note: None,
        };

        let created = service.create(input.clone()).await.unwrap();
        let copy = service.duplicate(created.id).await.unwrap();
        assert_eq!(copy.name, created.name);
        assert_ne!(copy.id, created.id);

        let zero = ProgramInput {
            media_count: 0,
            ..input
        };
        assert!(matches!(
            service.update(created.id, zero).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.delete(created.id).await.unwrap_err(),
            CatalogError::NotFound { .. }
        ));
    }
}
