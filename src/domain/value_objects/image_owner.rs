use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const REVIEW_DOCUMENT_TYPE: &str = "review";
pub const INVOICE_DOCUMENT_TYPE: &str = "invoice";

/// The record an image row belongs to. Stored as `(document_id, document_type)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "document_type", content = "document_id", rename_all = "snake_case")]
pub enum ImageOwner {
    Review(Uuid),
    Invoice(Uuid),
}

impl ImageOwner {
    pub fn document_id(&self) -> Uuid {
        match self {
            ImageOwner::Review(id) | ImageOwner::Invoice(id) => *id,
        }
    }

    pub fn document_type(&self) -> &'static str {
        match self {
            ImageOwner::Review(_) => REVIEW_DOCUMENT_TYPE,
            ImageOwner::Invoice(_) => INVOICE_DOCUMENT_TYPE,
        }
    }
}

impl Display for ImageOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.document_type(), self.document_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_maps_to_stored_columns() {
        let id = Uuid::new_v4();

        assert_eq!(ImageOwner::Review(id).document_type(), "review");
        assert_eq!(ImageOwner::Invoice(id).document_type(), "invoice");
        assert_eq!(ImageOwner::Review(id).document_id(), id);
        assert_eq!(ImageOwner::Invoice(id).to_string(), format!("invoice:{id}"));
    }
}
