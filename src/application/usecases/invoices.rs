use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::errors::{DashboardError, DashboardResult, MutationOutcome},
    domain::{
        entities::invoices::{InsertInvoiceEntity, UpdateInvoiceEntity},
        repositories::{invoices::InvoiceRepository, revalidation::PathRevalidator},
        value_objects::{
            invoices::{INVOICES_PATH, InvoiceForm, InvoiceFormDto, InvoiceTableDto, LatestInvoiceDto},
            pagination::{self, LATEST_INVOICES_LIMIT, ListFilter, Page},
        },
    },
};

pub struct InvoicesUseCase<I, V>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    invoice_repository: Arc<I>,
    revalidator: Arc<V>,
}

impl<I, V> InvoicesUseCase<I, V>
where
    I: InvoiceRepository + Send + Sync + 'static,
    V: PathRevalidator + Send + Sync + 'static,
{
    pub fn new(invoice_repository: Arc<I>, revalidator: Arc<V>) -> Self {
        Self {
            invoice_repository,
            revalidator,
        }
    }

    pub async fn list_filtered(&self, filter: &ListFilter) -> DashboardResult<Vec<InvoiceTableDto>> {
        let rows = self
            .invoice_repository
            .list_filtered(&filter.search_pattern(), filter.limit(), filter.offset())
            .await
            .map_err(|err| {
                error!(
                    query = %filter.query,
                    page = filter.current_page(),
                    db_error = ?err,
                    "invoices: failed to list filtered invoices"
                );
                DashboardError::fetch("invoices", err)
            })?;

        Ok(rows.into_iter().map(InvoiceTableDto::from).collect())
    }

    pub async fn count_pages(&self, query: &str) -> DashboardResult<i64> {
        let total = self
            .invoice_repository
            .count_filtered(&pagination::search_pattern(query))
            .await
            .map_err(|err| {
                error!(query, db_error = ?err, "invoices: failed to count filtered invoices");
                DashboardError::fetch("total number of invoices", err)
            })?;

        Ok(pagination::total_pages(total))
    }

    /// Rows of the requested page together with the page count for the same query.
    pub async fn list_page(&self, filter: &ListFilter) -> DashboardResult<Page<InvoiceTableDto>> {
        let (items, total_pages) =
            tokio::try_join!(self.list_filtered(filter), self.count_pages(&filter.query))?;

        Ok(Page {
            items,
            current_page: filter.current_page(),
            total_pages,
        })
    }

    pub async fn get_invoice(&self, invoice_id: Uuid) -> DashboardResult<InvoiceFormDto> {
        let invoice = self
            .invoice_repository
            .find_by_id(invoice_id)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to load invoice");
                DashboardError::fetch("invoice", err)
            })?;

        match invoice {
            Some(invoice) => Ok(InvoiceFormDto::from(invoice)),
            None => {
                warn!(%invoice_id, "invoices: invoice not found");
                Err(DashboardError::NotFound("Invoice"))
            }
        }
    }

    pub async fn list_latest(&self) -> DashboardResult<Vec<LatestInvoiceDto>> {
        let rows = self
            .invoice_repository
            .list_latest(LATEST_INVOICES_LIMIT)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "invoices: failed to list latest invoices");
                DashboardError::fetch("the latest invoices", err)
            })?;

        Ok(rows.into_iter().map(LatestInvoiceDto::from).collect())
    }

    pub async fn create_invoice(&self, form: InvoiceForm) -> DashboardResult<MutationOutcome> {
        let valid = form.into_valid().map_err(|errors| {
            warn!(fields = ?errors.keys().collect::<Vec<_>>(), "invoices: create rejected");
            DashboardError::Validation {
                errors,
                message: "Missing Fields. Failed to Create Invoice.".to_string(),
            }
        })?;

        let insert_invoice_entity = InsertInvoiceEntity {
            customer_id: valid.customer_id,
            amount: valid.amount_cents,
            status: valid.status.to_string(),
            date: Utc::now().date_naive(),
        };

        let invoice_id = self
            .invoice_repository
            .create_invoice(insert_invoice_entity)
            .await
            .map_err(|err| {
                error!(
                    customer_id = %valid.customer_id,
                    db_error = ?err,
                    "invoices: failed to create invoice"
                );
                DashboardError::storage("Create Invoice", err)
            })?;

        info!(%invoice_id, amount_cents = valid.amount_cents, "invoices: invoice created");
        self.revalidator.revalidate(INVOICES_PATH);

        Ok(MutationOutcome::Redirect { to: INVOICES_PATH })
    }

    /// Overwrites the invoice fields. A missing id is not an error.
    pub async fn update_invoice(
        &self,
        invoice_id: Uuid,
        form: InvoiceForm,
    ) -> DashboardResult<MutationOutcome> {
        let valid = form.into_valid().map_err(|errors| {
            warn!(%invoice_id, fields = ?errors.keys().collect::<Vec<_>>(), "invoices: update rejected");
            DashboardError::Validation {
                errors,
                message: "Missing Fields. Failed to Update Invoice.".to_string(),
            }
        })?;

        let changes = UpdateInvoiceEntity {
            customer_id: valid.customer_id,
            amount: valid.amount_cents,
            status: valid.status.to_string(),
        };

        let updated = self
            .invoice_repository
            .update_invoice(invoice_id, changes)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to update invoice");
                DashboardError::storage("Update Invoice", err)
            })?;

        info!(%invoice_id, updated, "invoices: invoice updated");
        self.revalidator.revalidate(INVOICES_PATH);

        Ok(MutationOutcome::Redirect { to: INVOICES_PATH })
    }

    pub async fn delete_invoice(&self, invoice_id: Uuid) -> DashboardResult<MutationOutcome> {
        let deleted = self
            .invoice_repository
            .delete_invoice(invoice_id)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to delete invoice");
                DashboardError::storage("Delete Invoice", err)
            })?;

        info!(%invoice_id, deleted, "invoices: invoice deleted");
        self.revalidator.revalidate(INVOICES_PATH);

        Ok(MutationOutcome::Message {
            message: "Invoice has been deleted.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use crate::domain::{
        entities::invoices::{InvoiceEntity, InvoiceTableRow},
        repositories::{invoices::MockInvoiceRepository, revalidation::MockPathRevalidator},
    };

    fn form(customer_id: Uuid, amount: &str, status: &str) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer_id.to_string(),
            amount: amount.to_string(),
            status: status.to_string(),
        }
    }

    fn expect_revalidate(revalidator: &mut MockPathRevalidator, times: usize) {
        revalidator
            .expect_revalidate()
            .withf(|path| path == INVOICES_PATH)
            .times(times)
            .return_const(());
    }

    fn usecase(
        repository: MockInvoiceRepository,
        revalidator: MockPathRevalidator,
    ) -> InvoicesUseCase<MockInvoiceRepository, MockPathRevalidator> {
        InvoicesUseCase::new(Arc::new(repository), Arc::new(revalidator))
    }

    #[tokio::test]
    async fn created_invoice_reads_back_in_major_units() {
        let customer_id = Uuid::new_v4();
        let invoice_id = Uuid::new_v4();
        let stored = Arc::new(std::sync::Mutex::new(None::<InsertInvoiceEntity>));

        let mut repository = MockInvoiceRepository::new();
        let captured = Arc::clone(&stored);
        repository
            .expect_create_invoice()
            .times(1)
            .returning(move |invoice| {
                *captured.lock().unwrap() = Some(invoice);
                Ok(invoice_id)
            });
        let readback = Arc::clone(&stored);
        repository
            .expect_find_by_id()
            .with(eq(invoice_id))
            .returning(move |id| {
                let inserted = readback.lock().unwrap().clone().unwrap();
                Ok(Some(InvoiceEntity {
                    id,
                    customer_id: inserted.customer_id,
                    amount: inserted.amount,
                    status: inserted.status,
                    date: inserted.date,
                }))
            });

        let mut revalidator = MockPathRevalidator::new();
        expect_revalidate(&mut revalidator, 1);

        let usecase = usecase(repository, revalidator);
        let outcome = usecase
            .create_invoice(form(customer_id, "42.50", "pending"))
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Redirect { to: INVOICES_PATH });

        let inserted = stored.lock().unwrap().clone().unwrap();
        assert_eq!(inserted.amount, 4250);
        assert_eq!(inserted.date, Utc::now().date_naive());

        let invoice = usecase.get_invoice(invoice_id).await.unwrap();
        assert_eq!(invoice.amount, 42.5);
        assert_eq!(invoice.status, "pending");
        assert_eq!(invoice.customer_id, customer_id);
    }

    #[tokio::test]
    async fn zero_amount_never_reaches_storage() {
        let mut repository = MockInvoiceRepository::new();
        repository.expect_create_invoice().never();
        let mut revalidator = MockPathRevalidator::new();
        expect_revalidate(&mut revalidator, 0);

        let err = usecase(repository, revalidator)
            .create_invoice(form(Uuid::new_v4(), "0", "paid"))
            .await
            .unwrap_err();

        match err {
            DashboardError::Validation { errors, message } => {
                assert_eq!(message, "Missing Fields. Failed to Create Invoice.");
                assert_eq!(
                    errors.get("amount"),
                    Some(&vec!["Please enter an amount greater than $0.".to_string()])
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn one_cent_is_accepted() {
        let mut repository = MockInvoiceRepository::new();
        repository
            .expect_create_invoice()
            .withf(|invoice| invoice.amount == 1 && invoice.status == "paid")
            .times(1)
            .returning(|_| Ok(Uuid::new_v4()));
        let mut revalidator = MockPathRevalidator::new();
        expect_revalidate(&mut revalidator, 1);

        usecase(repository, revalidator)
            .create_invoice(form(Uuid::new_v4(), "0.01", "paid"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn storage_failure_on_create_is_reported() {
        let mut repository = MockInvoiceRepository::new();
        repository
            .expect_create_invoice()
            .returning(|_| Err(anyhow!("connection refused")));
        let mut revalidator = MockPathRevalidator::new();
        expect_revalidate(&mut revalidator, 0);

        let err = usecase(repository, revalidator)
            .create_invoice(form(Uuid::new_v4(), "10", "paid"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Database Error: Failed to Create Invoice.");
    }

    #[tokio::test]
    async fn deleting_twice_succeeds_both_times() {
        let invoice_id = Uuid::new_v4();
        let mut repository = MockInvoiceRepository::new();
        let mut remaining = 1usize;
        repository
            .expect_delete_invoice()
            .with(eq(invoice_id))
            .times(2)
            .returning(move |_| {
                let deleted = remaining;
                remaining = 0;
                Ok(deleted)
            });
        let mut revalidator = MockPathRevalidator::new();
        expect_revalidate(&mut revalidator, 2);

        let usecase = usecase(repository, revalidator);
        for _ in 0..2 {
            let outcome = usecase.delete_invoice(invoice_id).await.unwrap();
            assert_eq!(
                outcome,
                MutationOutcome::Message {
                    message: "Invoice has been deleted.".to_string()
                }
            );
        }
    }

    #[tokio::test]
    async fn update_of_missing_invoice_still_redirects() {
        let invoice_id = Uuid::new_v4();
        let mut repository = MockInvoiceRepository::new();
        repository
            .expect_update_invoice()
            .withf(move |id, changes| *id == invoice_id && changes.amount == 999)
            .returning(|_, _| Ok(0));
        let mut revalidator = MockPathRevalidator::new();
        expect_revalidate(&mut revalidator, 1);

        let outcome = usecase(repository, revalidator)
            .update_invoice(invoice_id, form(Uuid::new_v4(), "9.99", "paid"))
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Redirect { to: INVOICES_PATH });
    }

    #[tokio::test]
    async fn unknown_invoice_is_not_found() {
        let mut repository = MockInvoiceRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let err = usecase(repository, MockPathRevalidator::new())
            .get_invoice(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::NotFound("Invoice")));
    }

    #[tokio::test]
    async fn page_uses_offset_and_shared_pattern() {
        let row = InvoiceTableRow {
            id: Uuid::new_v4(),
            amount: 1500,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: "paid".to_string(),
            name: "Lee Robinson".to_string(),
            email: "lee@robinson.com".to_string(),
            image_url: "/customers/lee-robinson.png".to_string(),
        };

        let mut repository = MockInvoiceRepository::new();
        repository
            .expect_list_filtered()
            .withf(|pattern, limit, offset| pattern == "%lee%" && *limit == 6 && *offset == 6)
            .returning(move |_, _, _| Ok(vec![row.clone()]));
        repository
            .expect_count_filtered()
            .withf(|pattern| pattern == "%lee%")
            .returning(|_| Ok(7));

        let page = usecase(repository, MockPathRevalidator::new())
            .list_page(&ListFilter::new("lee", 2))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn listing_failure_is_a_fetch_error() {
        let mut repository = MockInvoiceRepository::new();
        repository
            .expect_list_filtered()
            .returning(|_, _, _| Err(anyhow!("timeout")));

        let err = usecase(repository, MockPathRevalidator::new())
            .list_filtered(&ListFilter::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch invoices.");
    }
}
