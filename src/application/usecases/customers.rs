use std::sync::Arc;

use tracing::error;

use crate::{
    application::usecases::errors::{DashboardError, DashboardResult},
    domain::{
        repositories::customers::CustomerRepository,
        value_objects::{
            customers::{CustomerFieldDto, CustomerSummaryDto},
            pagination,
        },
    },
};

pub struct CustomersUseCase<C>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    customer_repository: Arc<C>,
}

impl<C> CustomersUseCase<C>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    pub fn new(customer_repository: Arc<C>) -> Self {
        Self {
            customer_repository,
        }
    }

    pub async fn list_customers(&self) -> DashboardResult<Vec<CustomerFieldDto>> {
        let customers = self
            .customer_repository
            .list_customers()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "customers: failed to list customers");
                DashboardError::fetch("all customers", err)
            })?;

        Ok(customers.into_iter().map(CustomerFieldDto::from).collect())
    }

    pub async fn list_filtered(&self, query: &str) -> DashboardResult<Vec<CustomerSummaryDto>> {
        let customers = self
            .customer_repository
            .list_filtered_customers(&pagination::search_pattern(query))
            .await
            .map_err(|err| {
                error!(query, db_error = ?err, "customers: failed to search customers");
                DashboardError::fetch("customer table", err)
            })?;

        Ok(customers.into_iter().map(CustomerSummaryDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use uuid::Uuid;

    use crate::domain::{
        entities::customers::{CustomerField, CustomerSummaryRow},
        repositories::customers::MockCustomerRepository,
    };

    #[tokio::test]
    async fn customers_keep_repository_order() {
        let mut repository = MockCustomerRepository::new();
        repository.expect_list_customers().returning(|| {
            Ok(vec![
                CustomerField {
                    id: Uuid::new_v4(),
                    name: "Amy Burns".to_string(),
                },
                CustomerField {
                    id: Uuid::new_v4(),
                    name: "Balazs Orban".to_string(),
                },
            ])
        });

        let customers = CustomersUseCase::new(Arc::new(repository))
            .list_customers()
            .await
            .unwrap();
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Amy Burns", "Balazs Orban"]);
    }

    #[tokio::test]
    async fn search_wraps_query_in_wildcards() {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_list_filtered_customers()
            .withf(|pattern| pattern == "%amy%")
            .returning(|_| {
                Ok(vec![CustomerSummaryRow {
                    id: Uuid::new_v4(),
                    name: "Amy Burns".to_string(),
                    email: "amy@burns.com".to_string(),
                    image_url: "/customers/amy-burns.png".to_string(),
                    total_reviews: 3,
                }])
            });

        let customers = CustomersUseCase::new(Arc::new(repository))
            .list_filtered("amy")
            .await
            .unwrap();
        assert_eq!(customers[0].total_reviews, 3);
    }

    #[tokio::test]
    async fn failure_is_reported_as_fetch_error() {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_list_customers()
            .returning(|| Err(anyhow!("pool timed out")));

        let err = CustomersUseCase::new(Arc::new(repository))
            .list_customers()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch all customers.");
    }
}
