use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::invoices::{
        InsertInvoiceEntity, InvoiceEntity, InvoiceTableRow, LatestInvoiceRow, UpdateInvoiceEntity,
    },
    value_objects::dashboard_cards::InvoiceTotals,
};

/// Listing and counting must share one search predicate so page counts match page contents.
#[automock]
#[async_trait]
pub trait InvoiceRepository {
    async fn list_filtered(
        &self,
        search_pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InvoiceTableRow>>;
    async fn count_filtered(&self, search_pattern: &str) -> Result<i64>;
    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>>;
    async fn list_latest(&self, limit: i64) -> Result<Vec<LatestInvoiceRow>>;
    async fn count_invoices(&self) -> Result<i64>;
    async fn sum_by_status(&self) -> Result<InvoiceTotals>;
    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> Result<Uuid>;
    /// Returns the number of rows touched; zero when the id does not exist.
    async fn update_invoice(&self, invoice_id: Uuid, changes: UpdateInvoiceEntity)
    -> Result<usize>;
    async fn delete_invoice(&self, invoice_id: Uuid) -> Result<usize>;
}
