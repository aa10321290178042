use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::customers;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Insertable, PartialEq)]
#[diesel(table_name = customers)]
pub struct CustomerEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// `(id, name)` pair used to fill author/customer select inputs.
#[derive(Debug, Clone, Selectable, Queryable, PartialEq)]
#[diesel(table_name = customers)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, PartialEq)]
pub struct CustomerSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_reviews: i64,
}
