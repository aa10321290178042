pub mod credentials;
pub mod customers;
pub mod images;
pub mod invoices;
pub mod reviews;
pub mod search;
