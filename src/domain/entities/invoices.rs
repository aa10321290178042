use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::invoices;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

/// Seed rows carry fixed ids so re-running the loader is a no-op.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct SeedInvoiceEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = invoices)]
pub struct UpdateInvoiceEntity {
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
}

/// One row of the invoices table view: invoice joined with its customer.
#[derive(Debug, Clone, Queryable, PartialEq)]
pub struct InvoiceTableRow {
    pub id: Uuid,
    pub amount: i32,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Queryable, PartialEq)]
pub struct LatestInvoiceRow {
    pub id: Uuid,
    pub amount: i32,
    pub name: String,
    pub email: String,
    pub image_url: String,
}
