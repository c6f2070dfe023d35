use crate::db::Store;
use crate::domain::{Page, Paging};
use crate::models::picture::{EncodedPicture, PictureData};
use crate::services::CatalogError;
use crate::services::picture_service::PictureService;
use async_trait::async_trait;
use tracing::info;

const ENTITY: &str = "Picture";

pub struct SeaOrmPictureService {
    store: Store,
}

impl SeaOrmPictureService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn decode(data: &PictureData) -> Result<Vec<u8>, CatalogError> {
    let content = data
        .decode()
        .ok_or_else(|| CatalogError::validation("Picture content is not valid base64"))?;

    if content.is_empty() {
        return Err(CatalogError::validation("Picture content must not be empty"));
    }
    Ok(content)
}

#[async_trait]
impl PictureService for SeaOrmPictureService {
    async fn list_ids(&self, paging: Paging) -> Result<Page<i32>, CatalogError> {
        Ok(self.store.pictures().list_ids(paging).await?)
    }

    async fn get(&self, id: i32) -> Result<EncodedPicture, CatalogError> {
        self.store
            .pictures()
            .get(id)
            .await?
            .map(EncodedPicture::from)
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn create(&self, data: PictureData) -> Result<EncodedPicture, CatalogError> {
        let content = decode(&data)?;
        let picture = self.store.pictures().create(content).await?;
        info!(id = picture.id, bytes = picture.content.len(), "Picture stored");
        Ok(picture.into())
    }

    async fn update(&self, id: i32, data: PictureData) -> Result<EncodedPicture, CatalogError> {
        let content = decode(&data)?;
        self.store
            .pictures()
            .update(id, content)
            .await?
            .map(EncodedPicture::from)
            .ok_or(CatalogError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let repo = self.store.pictures();
        if !repo.exists(id).await? {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        if repo.is_used(id).await? {
            return Err(CatalogError::conflict(format!(
                "Picture {id} is still used by a movie, show or game"
            )));
        }

        repo.delete(id).await?;
        info!(id, "Picture deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(content: &str) -> PictureData {
        PictureData {
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn stores_and_returns_base64() {
        let service = SeaOrmPictureService::new(Store::new("sqlite::memory:").await.unwrap());

        let created = service.create(data("AQID")).await.unwrap();
        assert_eq!(created.content, "AQID");

        let updated = service.update(created.id, data("BAUG")).await.unwrap();
        assert_eq!(updated.content, "BAUG");

        let page = service.list_ids(Paging::new(1, 10)).await.unwrap();
        assert_eq!(page.data, vec![created.id]);
    }

    #[tokio::test]
    async fn rejects_empty_and_invalid_content() {
        let service = SeaOrmPictureService::new(Store::new("sqlite::memory:").await.unwrap());

        assert!(matches!(
            service.create(data("")).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
        assert!(matches!(
            service.create(data("%%%")).await.unwrap_err(),
            CatalogError::Validation(_)
        ));
    }
}
