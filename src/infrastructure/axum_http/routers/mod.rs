pub mod auth;
pub mod customers;
pub mod invoices;
pub mod revalidations;
pub mod reviews;
