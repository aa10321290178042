pub mod credentials;
pub mod customers;
pub mod file_store;
pub mod images;
pub mod invoices;
pub mod revalidation;
pub mod reviews;
