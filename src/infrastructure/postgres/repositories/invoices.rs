use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    OptionalExtension, RunQueryDsl, delete, dsl::count_star, dsl::sql, insert_into, prelude::*,
    sql_types::BigInt, update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::invoices::{
            InsertInvoiceEntity, InvoiceEntity, InvoiceTableRow, LatestInvoiceRow,
            UpdateInvoiceEntity,
        },
        repositories::invoices::InvoiceRepository,
        value_objects::dashboard_cards::InvoiceTotals,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::search::{invoice_listing_order, invoice_search},
        schema::{customers, invoices},
    },
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn list_filtered(
        &self,
        search_pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InvoiceTableRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = invoices::table
            .inner_join(customers::table)
            .filter(invoice_search(search_pattern.to_string()))
            .select((
                invoices::id,
                invoices::amount,
                invoices::date,
                invoices::status,
                customers::name,
                customers::email,
                customers::image_url,
            ))
            .order(invoice_listing_order())
            .limit(limit)
            .offset(offset)
            .load::<InvoiceTableRow>(&mut conn)?;

        Ok(results)
    }

    async fn count_filtered(&self, search_pattern: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = invoices::table
            .inner_join(customers::table)
            .filter(invoice_search(search_pattern.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = invoices::table
            .find(invoice_id)
            .select(InvoiceEntity::as_select())
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn list_latest(&self, limit: i64) -> Result<Vec<LatestInvoiceRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = invoices::table
            .inner_join(customers::table)
            .select((
                invoices::id,
                invoices::amount,
                customers::name,
                customers::email,
                customers::image_url,
            ))
            .order(invoice_listing_order())
            .limit(limit)
            .load::<LatestInvoiceRow>(&mut conn)?;

        Ok(results)
    }

    async fn count_invoices(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = invoices::table.select(count_star()).first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn sum_by_status(&self) -> Result<InvoiceTotals> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let (paid, pending) = invoices::table
            .select((
                sql::<BigInt>(
                    "COALESCE(SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END), 0)::bigint",
                ),
                sql::<BigInt>(
                    "COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0)::bigint",
                ),
            ))
            .first::<(i64, i64)>(&mut conn)?;

        Ok(InvoiceTotals { paid, pending })
    }

    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice_id = insert_into(invoices::table)
            .values(&invoice)
            .returning(invoices::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(invoice_id)
    }

    async fn update_invoice(
        &self,
        invoice_id: Uuid,
        changes: UpdateInvoiceEntity,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(invoices::table.find(invoice_id))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(updated)
    }

    async fn delete_invoice(&self, invoice_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(invoices::table.find(invoice_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}
