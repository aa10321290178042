use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::images::ImageEntity, repositories::images::ImageRepository,
        value_objects::image_owner::ImageOwner,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::images},
};

pub struct ImagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ImagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ImageRepository for ImagePostgres {
    async fn list_for_owner(&self, owner: ImageOwner, limit: i64) -> Result<Vec<ImageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = images::table
            .filter(images::document_id.eq(owner.document_id()))
            .filter(images::document_type.eq(owner.document_type()))
            .select(ImageEntity::as_select())
            .order(images::id.desc())
            .limit(limit)
            .load::<ImageEntity>(&mut conn)?;

        Ok(results)
    }
}
