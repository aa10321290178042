use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::reviews;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = reviews)]
pub struct ReviewEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub next_part_id: Option<Uuid>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = reviews)]
pub struct InsertReviewEntity {
    pub customer_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub next_part_id: Option<Uuid>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub struct SeedReviewEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub next_part_id: Option<Uuid>,
    pub text: Option<String>,
}

/// `created_at` is deliberately absent: updates never touch it.
#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = reviews)]
pub struct UpdateReviewEntity {
    pub customer_id: Uuid,
    pub title: String,
    pub status: String,
    pub text: Option<String>,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, Queryable, PartialEq)]
pub struct ReviewTableRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub author_name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Queryable, PartialEq)]
pub struct ReviewDetailRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub next_part_id: Option<Uuid>,
    pub text: Option<String>,
    pub author_name: String,
    pub email: String,
    pub image_url: String,
}
