use std::sync::Arc;

use tracing::error;

use crate::{
    application::usecases::errors::{DashboardError, DashboardResult},
    domain::{
        repositories::{
            customers::CustomerRepository, invoices::InvoiceRepository, reviews::ReviewRepository,
        },
        value_objects::{
            dashboard_cards::{InvoiceCardsDto, ReviewCardsDto},
            enums::review_statuses::ReviewStatus,
            money::format_currency,
        },
    },
};

pub struct DashboardCardsUseCase<R, I, C>
where
    R: ReviewRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
{
    review_repository: Arc<R>,
    invoice_repository: Arc<I>,
    customer_repository: Arc<C>,
}

impl<R, I, C> DashboardCardsUseCase<R, I, C>
where
    R: ReviewRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
{
    pub fn new(
        review_repository: Arc<R>,
        invoice_repository: Arc<I>,
        customer_repository: Arc<C>,
    ) -> Self {
        Self {
            review_repository,
            invoice_repository,
            customer_repository,
        }
    }

    pub async fn review_cards(&self) -> DashboardResult<ReviewCardsDto> {
        let (number_of_reviews, number_of_authors) = tokio::try_join!(
            self.review_repository.count_by_statuses(ReviewStatus::visible()),
            self.customer_repository.count_customers(),
        )
        .map_err(|err| {
            error!(db_error = ?err, "dashboard_cards: failed to load review cards");
            DashboardError::fetch("card data", err)
        })?;

        Ok(ReviewCardsDto {
            number_of_reviews,
            number_of_authors,
        })
    }

    pub async fn invoice_cards(&self) -> DashboardResult<InvoiceCardsDto> {
        let (number_of_invoices, number_of_customers, totals) = tokio::try_join!(
            self.invoice_repository.count_invoices(),
            self.customer_repository.count_customers(),
            self.invoice_repository.sum_by_status(),
        )
        .map_err(|err| {
            error!(db_error = ?err, "dashboard_cards: failed to load invoice cards");
            DashboardError::fetch("card data", err)
        })?;

        Ok(InvoiceCardsDto {
            number_of_invoices,
            number_of_customers,
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        })
    }
}
