use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::customers::{CustomerField, CustomerSummaryRow};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerFieldDto {
    pub id: Uuid,
    pub name: String,
}

impl From<CustomerField> for CustomerFieldDto {
    fn from(value: CustomerField) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_reviews: i64,
}

impl From<CustomerSummaryRow> for CustomerSummaryDto {
    fn from(value: CustomerSummaryRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            image_url: value.image_url,
            total_reviews: value.total_reviews,
        }
    }
}
