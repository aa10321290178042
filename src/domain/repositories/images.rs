use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{entities::images::ImageEntity, value_objects::image_owner::ImageOwner};

#[automock]
#[async_trait]
pub trait ImageRepository {
    async fn list_for_owner(&self, owner: ImageOwner, limit: i64) -> Result<Vec<ImageEntity>>;
}
