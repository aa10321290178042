use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::reviews::{
    InsertReviewEntity, ReviewDetailRow, ReviewTableRow, UpdateReviewEntity,
};

#[automock]
#[async_trait]
pub trait ReviewRepository {
    async fn list_filtered(
        &self,
        search_pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewTableRow>>;
    async fn count_filtered(&self, search_pattern: &str) -> Result<i64>;
    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<ReviewDetailRow>>;
    async fn count_by_statuses(&self, statuses: Vec<String>) -> Result<i64>;
    /// Inserts the review and, when a url is given, its first image in one transaction.
    async fn create_review_with_image(
        &self,
        review: InsertReviewEntity,
        image_url: Option<String>,
    ) -> Result<Uuid>;
    async fn update_review(&self, review_id: Uuid, changes: UpdateReviewEntity) -> Result<usize>;
    async fn delete_review(&self, review_id: Uuid) -> Result<usize>;
}
