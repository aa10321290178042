pub mod customers;
pub mod dashboard_cards;
pub mod errors;
pub mod invoices;
pub mod reviews;
pub mod sign_in;
