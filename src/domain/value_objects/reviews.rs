use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{
    entities::{
        images::ImageEntity,
        reviews::{ReviewDetailRow, ReviewTableRow},
    },
    value_objects::{
        enums::review_statuses::ReviewStatus,
        form_state::{FieldErrors, flatten_validation_errors, single_field_error, validation_error},
    },
};

pub const REVIEWS_PATH: &str = "/dashboard/reviews";
const TITLE_MAX_CHARS: usize = 255;

fn parse_author_id(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| validation_error("invalid_author", "Please select an author."))
}

fn parse_title(value: &str) -> Result<String, ValidationError> {
    let title = value.trim();
    if title.is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return Err(validation_error("invalid_title", "Please enter a title."));
    }
    Ok(title.to_string())
}

fn parse_status(value: &str) -> Result<ReviewStatus, ValidationError> {
    value
        .parse::<ReviewStatus>()
        .map_err(|_| validation_error("invalid_status", "Please select a review status."))
}

fn parse_text(value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("invalid_text", "Please enter the review text."));
    }
    Ok(value.to_string())
}

fn validate_author_id(value: &str) -> Result<(), ValidationError> {
    parse_author_id(value).map(|_| ())
}

fn validate_title(value: &str) -> Result<(), ValidationError> {
    parse_title(value).map(|_| ())
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    parse_status(value).map(|_| ())
}

fn validate_text(value: &str) -> Result<(), ValidationError> {
    parse_text(value).map(|_| ())
}

/// Untrusted review form payload. Used for both create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    #[serde(default)]
    #[validate(custom = "validate_author_id")]
    pub customer_id: String,
    #[serde(default)]
    #[validate(custom = "validate_title")]
    pub title: String,
    #[serde(default)]
    #[validate(custom = "validate_status")]
    pub status: String,
    #[serde(default)]
    #[validate(custom = "validate_text")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidReviewInput {
    pub customer_id: Uuid,
    pub title: String,
    pub status: ReviewStatus,
    pub text: String,
}

impl ReviewForm {
    pub fn into_valid(self) -> Result<ValidReviewInput, FieldErrors> {
        self.validate()
            .map_err(|errors| flatten_validation_errors(&errors))?;

        Ok(ValidReviewInput {
            customer_id: parse_author_id(&self.customer_id)
                .map_err(|err| single_field_error("customer_id", &err))?,
            title: parse_title(&self.title).map_err(|err| single_field_error("title", &err))?,
            status: parse_status(&self.status).map_err(|err| single_field_error("status", &err))?,
            text: parse_text(&self.text).map_err(|err| single_field_error("text", &err))?,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewTableDto {
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

impl From<ReviewTableRow> for ReviewTableDto {
    fn from(value: ReviewTableRow) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            title: value.title,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
            author_name: value.author_name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewDetailDto {
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

impl From<ReviewDetailRow> for ReviewDetailDto {
    fn from(value: ReviewDetailRow) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            title: value.title,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
            next_part_id: value.next_part_id,
            text: value.text,
            author_name: value.author_name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageDto {
    pub id: Uuid,
    pub document_type: String,
    pub url: String,
}

impl From<ImageEntity> for ImageDto {
    fn from(value: ImageEntity) -> Self {
        Self {
            id: value.id,
            document_type: value.document_type,
            url: value.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ReviewForm {
        ReviewForm {
            customer_id: Uuid::new_v4().to_string(),
            title: "Great ride".to_string(),
            status: "pending".to_string(),
            text: "Smooth trip".to_string(),
        }
    }

    #[test]
    fn valid_form_is_typed() {
        let valid = valid_form().into_valid().unwrap();
        assert_eq!(valid.title, "Great ride");
        assert_eq!(valid.status, ReviewStatus::Pending);
        assert_eq!(valid.text, "Smooth trip");
    }

    #[test]
    fn title_is_trimmed_and_bounded() {
        let mut form = valid_form();
        form.title = "  Great ride  ".to_string();
        assert_eq!(form.into_valid().unwrap().title, "Great ride");

        let mut form = valid_form();
        form.title = "x".repeat(256);
        let errors = form.into_valid().unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some(&vec!["Please enter a title.".to_string()])
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = valid_form();
        form.status = "draft".to_string();
        let errors = form.into_valid().unwrap_err();
        assert_eq!(
            errors.get("status"),
            Some(&vec!["Please select a review status.".to_string()])
        );
    }

    #[test]
    fn empty_form_reports_all_fields() {
        let errors = ReviewForm::default().into_valid().unwrap_err();
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["customerId", "status", "text", "title"]);
    }
}
