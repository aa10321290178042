use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    Connection, OptionalExtension, RunQueryDsl, delete, dsl::count_star, insert_into, prelude::*,
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            images::InsertImageEntity,
            reviews::{InsertReviewEntity, ReviewDetailRow, ReviewTableRow, UpdateReviewEntity},
        },
        repositories::reviews::ReviewRepository,
        value_objects::image_owner::ImageOwner,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::search::{review_listing_order, review_search},
        schema::{customers, images, reviews},
    },
};

pub struct ReviewPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ReviewPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ReviewRepository for ReviewPostgres {
    async fn list_filtered(
        &self,
        search_pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewTableRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = reviews::table
            .inner_join(customers::table)
            .filter(review_search(search_pattern.to_string()))
            .select((
                reviews::id,
                reviews::customer_id,
                reviews::title,
                reviews::status,
                reviews::created_at,
                reviews::updated_at,
                customers::name,
                customers::email,
                customers::image_url,
            ))
            .order(review_listing_order())
            .limit(limit)
            .offset(offset)
            .load::<ReviewTableRow>(&mut conn)?;

        Ok(results)
    }

    async fn count_filtered(&self, search_pattern: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = reviews::table
            .inner_join(customers::table)
            .filter(review_search(search_pattern.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<ReviewDetailRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let review = reviews::table
            .inner_join(customers::table)
            .filter(reviews::id.eq(review_id))
            .select((
                reviews::id,
                reviews::customer_id,
                reviews::title,
                reviews::status,
                reviews::created_at,
                reviews::updated_at,
                reviews::next_part_id,
                reviews::text,
                customers::name,
                customers::email,
                customers::image_url,
            ))
            .first::<ReviewDetailRow>(&mut conn)
            .optional()?;

        Ok(review)
    }

    async fn count_by_statuses(&self, statuses: Vec<String>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = reviews::table
            .filter(reviews::status.eq_any(statuses))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn create_review_with_image(
        &self,
        review: InsertReviewEntity,
        image_url: Option<String>,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let review_id = conn.transaction::<Uuid, diesel::result::Error, _>(|tx| {
            let review_id = insert_into(reviews::table)
                .values(&review)
                .returning(reviews::id)
                .get_result::<Uuid>(tx)?;

            if let Some(url) = image_url {
                insert_into(images::table)
                    .values(&InsertImageEntity::new(ImageOwner::Review(review_id), url))
                    .execute(tx)?;
            }

            Ok(review_id)
        })?;

        Ok(review_id)
    }

    async fn update_review(&self, review_id: Uuid, changes: UpdateReviewEntity) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(reviews::table.find(review_id))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(updated)
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(reviews::table.find(review_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}
