use crate::db::Store;
use crate::domain::{Filter, Page};
use crate::models::author::{Author, AuthorInput};
use crate::services::author_service::AuthorService;
use crate::services::{CatalogError, rules};
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Author";

pub struct SeaOrmAuthorService {
    store: Store,
}

impl SeaOrmAuthorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn validate(input: &AuthorInput) -> Result<(), CatalogError> {
    rules::require_text("first_name", &input.first_name)?;
    rules::optional_text("middle_name", input.middle_name.as_deref())?;
    rules::require_text("last_name", &input.last_name)
}

#[async_trait]
impl AuthorService for SeaOrmAuthorService {
    async fn list(&self, filter: &Filter) -> Result<Page<Author>, CatalogError> {
        Ok(self.store.authors().list(filter).await?)
    }

    async fn get(&self, id: i32) -> Result<Author, CatalogError> {
        self.store
            .authors()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, input: AuthorInput) -> Result<Author, CatalogError> {
        validate(&input)?;
        let author = self.store.authors().create(&input).await?;
        info!(id = author.id, "Author created");
        Ok(author)
    }

    async fn update(&self, id: i32, input: AuthorInput) -> Result<Author, CatalogError> {
        validate(&input)?;
        self.store
            .authors()
            .update(id, &input)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn duplicate(&self, id: i32) -> Result<Author, CatalogError> {
        self.store
            .authors()
            .duplicate(id)
            .await?
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let repo = self.store.authors();
        if repo.get(id).await?.is_none() {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        if repo.is_used(id).await? {
            return Err(CatalogError::conflict(format!(
                "Author {id} is still assigned to a book"
            )));
        }

        repo.delete(id).await?;
        info!(id, "Author deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Paging;

    fn input(first: &str, last: &str) -> AuthorInput {
        AuthorInput {
            first_name: first.to_string(),
            middle_name: None,
            last_name: last.to_string(),
        }
    }

    #[tokio::test]
    async fn listing_sorts_by_last_name() {
        let service = SeaOrmAuthorService::new(Store::new("sqlite::memory:").await.unwrap());
        service.create(input("Terry", "Pratchett")).await.unwrap();
        service.create(input("Karel", "Čapek")).await.unwrap();
        service.create(input("Isaac", "Asimov")).await.unwrap();

        let page = service
            .list(&Filter {
                name: None,
                paging: Paging::new(1, 10),
            })
            .await
            .unwrap();
        let last: Vec<&str> = page.data.iter().map(|a| a.last_name.as_str()).collect();
        assert_eq!(last, vec!["Asimov", "Čapek", "Pratchett"]);
    }

    #[tokio::test]
    async fn blank_middle_name_is_rejected() {
        let service = SeaOrmAuthorService::new(Store::new("sqlite::memory:").await.unwrap());
        let mut author = input("J", "Tolkien");
        author.middle_name = Some(" ".to_string());
        assert!(matches!(
            service.create(author).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
    }
}
