use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewCardsDto {
    pub number_of_reviews: i64,
    pub number_of_authors: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceCardsDto {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

/// Cents per invoice status, summed in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceTotals {
    pub paid: i64,
    pub pending: i64,
}
