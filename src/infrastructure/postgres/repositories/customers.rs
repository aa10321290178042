use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl,
    dsl::{count, count_star},
    prelude::*,
};
use std::sync::Arc;

use crate::{
    domain::{
        entities::customers::{CustomerField, CustomerSummaryRow},
        repositories::customers::CustomerRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{customers, reviews},
    },
};

pub struct CustomerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CustomerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CustomerRepository for CustomerPostgres {
    async fn list_customers(&self) -> Result<Vec<CustomerField>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = customers::table
            .select(CustomerField::as_select())
            .order((customers::name.asc(), customers::id.asc()))
            .load::<CustomerField>(&mut conn)?;

        Ok(results)
    }

    async fn list_filtered_customers(
        &self,
        search_pattern: &str,
    ) -> Result<Vec<CustomerSummaryRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = customers::table
            .left_join(reviews::table)
            .filter(
                customers::name
                    .ilike(search_pattern)
                    .or(customers::email.ilike(search_pattern)),
            )
            .group_by(customers::id)
            .select((
                customers::id,
                customers::name,
                customers::email,
                customers::image_url,
                count(reviews::id.nullable()),
            ))
            .order((customers::name.asc(), customers::id.asc()))
            .load::<CustomerSummaryRow>(&mut conn)?;

        Ok(results)
    }

    async fn count_customers(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = customers::table.select(count_star()).first::<i64>(&mut conn)?;

        Ok(total)
    }
}
