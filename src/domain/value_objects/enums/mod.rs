pub mod invoice_statuses;
pub mod review_statuses;
