pub mod auth;
pub mod customers;
pub mod dashboard_cards;
pub mod enums;
pub mod form_state;
pub mod image_owner;
pub mod invoices;
pub mod money;
pub mod pagination;
pub mod reviews;
pub mod uploads;
