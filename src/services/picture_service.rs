use crate::domain::{Page, Paging};
use crate::models::picture::{EncodedPicture, PictureData};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait PictureService: Send + Sync {
    /// Lists picture ids; content is fetched per picture.
    async fn list_ids(&self, paging: Paging) -> Result<Page<i32>, CatalogError>;

    async fn get(&self, id: i32) -> Result<EncodedPicture, CatalogError>;

    async fn create(&self, data: PictureData) -> Result<EncodedPicture, CatalogError>;

    async fn update(&self, id: i32, data: PictureData) -> Result<EncodedPicture, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] while a movie, show or game uses it.
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
