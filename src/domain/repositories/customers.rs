use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::customers::{CustomerField, CustomerSummaryRow};

#[automock]
#[async_trait]
pub trait CustomerRepository {
    async fn list_customers(&self) -> Result<Vec<CustomerField>>;
    async fn list_filtered_customers(&self, search_pattern: &str)
    -> Result<Vec<CustomerSummaryRow>>;
    async fn count_customers(&self) -> Result<i64>;
}
