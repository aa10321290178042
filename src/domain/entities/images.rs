use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::image_owner::ImageOwner, infrastructure::postgres::schema::images,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = images)]
pub struct ImageEntity {
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = images)]
pub struct InsertImageEntity {
    pub document_id: Uuid,
    pub document_type: String,
    pub url: String,
}

impl InsertImageEntity {
    pub fn new(owner: ImageOwner, url: String) -> Self {
        Self {
            document_id: owner.document_id(),
            document_type: owner.document_type().to_string(),
            url,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = images)]
pub struct SeedImageEntity {
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_type: String,
    pub url: String,
}
