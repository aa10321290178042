use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{
    entities::invoices::{InvoiceEntity, InvoiceTableRow, LatestInvoiceRow},
    value_objects::{
        enums::invoice_statuses::InvoiceStatus,
        form_state::{FieldErrors, flatten_validation_errors, single_field_error, validation_error},
        money::{format_currency, to_major_units, to_minor_units},
    },
};

pub const INVOICES_PATH: &str = "/dashboard/invoices";

fn parse_customer_id(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| validation_error("invalid_customer", "Please select a customer."))
}

fn parse_amount_cents(value: &str) -> Result<i32, ValidationError> {
    let trimmed = value.trim();
    // An empty input coerces to 0, which fails the positive check below.
    let amount = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().map_err(|_| {
            validation_error("invalid_amount", "Please enter an amount greater than $0.")
        })?
    };

    if !(amount > 0.0) {
        return Err(validation_error(
            "invalid_amount",
            "Please enter an amount greater than $0.",
        ));
    }

    let cents = to_minor_units(amount)
        .map_err(|_| validation_error("amount_too_large", "Please enter a smaller amount."))?;
    if cents < 1 {
        return Err(validation_error(
            "invalid_amount",
            "Please enter an amount greater than $0.",
        ));
    }
    Ok(cents)
}

fn parse_status(value: &str) -> Result<InvoiceStatus, ValidationError> {
    value
        .parse::<InvoiceStatus>()
        .map_err(|_| validation_error("invalid_status", "Please select an invoice status."))
}

fn validate_customer_id(value: &str) -> Result<(), ValidationError> {
    parse_customer_id(value).map(|_| ())
}

fn validate_amount(value: &str) -> Result<(), ValidationError> {
    parse_amount_cents(value).map(|_| ())
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    parse_status(value).map(|_| ())
}

/// Untrusted invoice form payload. Used for both create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    #[serde(default)]
    #[validate(custom = "validate_customer_id")]
    pub customer_id: String,
    #[serde(default)]
    #[validate(custom = "validate_amount")]
    pub amount: String,
    #[serde(default)]
    #[validate(custom = "validate_status")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidInvoiceInput {
    pub customer_id: Uuid,
    pub amount_cents: i32,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    pub fn into_valid(self) -> Result<ValidInvoiceInput, FieldErrors> {
        self.validate()
            .map_err(|errors| flatten_validation_errors(&errors))?;

        Ok(ValidInvoiceInput {
            customer_id: parse_customer_id(&self.customer_id)
                .map_err(|err| single_field_error("customer_id", &err))?,
            amount_cents: parse_amount_cents(&self.amount)
                .map_err(|err| single_field_error("amount", &err))?,
            status: parse_status(&self.status).map_err(|err| single_field_error("status", &err))?,
        })
    }
}

/// Invoice as loaded for the edit form; the amount is in major units.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceFormDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: f64,
    pub status: String,
}

impl From<InvoiceEntity> for InvoiceFormDto {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            amount: to_major_units(value.amount),
            status: value.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceTableDto {
    pub id: Uuid,
    pub amount: i32,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl From<InvoiceTableRow> for InvoiceTableDto {
    fn from(value: InvoiceTableRow) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            date: value.date,
            status: value.status,
            name: value.name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatestInvoiceDto {
    pub id: Uuid,
    pub amount: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl From<LatestInvoiceRow> for LatestInvoiceDto {
    fn from(value: LatestInvoiceRow) -> Self {
        Self {
            id: value.id,
            amount: format_currency(i64::from(value.amount)),
            name: value.name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer_id.to_string(),
            amount: amount.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn valid_form_is_converted_to_cents() {
        let customer_id = Uuid::new_v4();
        let valid = form(&customer_id.to_string(), "42.50", "pending")
            .into_valid()
            .unwrap();

        assert_eq!(valid.customer_id, customer_id);
        assert_eq!(valid.amount_cents, 4250);
        assert_eq!(valid.status, InvoiceStatus::Pending);
    }

    #[test]
    fn smallest_positive_amount_is_accepted() {
        let valid = form(&Uuid::new_v4().to_string(), "0.01", "paid")
            .into_valid()
            .unwrap();
        assert_eq!(valid.amount_cents, 1);
    }

    #[test]
    fn zero_amount_is_rejected_with_message() {
        let errors = form(&Uuid::new_v4().to_string(), "0", "paid")
            .into_valid()
            .unwrap_err();

        assert_eq!(
            errors.get("amount"),
            Some(&vec!["Please enter an amount greater than $0.".to_string()])
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn empty_and_non_numeric_amounts_are_rejected() {
        for amount in ["", "   ", "abc", "-3", "NaN"] {
            let errors = form(&Uuid::new_v4().to_string(), amount, "paid")
                .into_valid()
                .unwrap_err();
            assert!(errors.contains_key("amount"), "amount {amount:?} passed");
        }
    }

    #[test]
    fn every_bad_field_is_reported() {
        let errors = InvoiceForm::default().into_valid().unwrap_err();

        assert_eq!(
            errors.get("customerId"),
            Some(&vec!["Please select a customer.".to_string()])
        );
        assert_eq!(
            errors.get("status"),
            Some(&vec!["Please select an invoice status.".to_string()])
        );
        assert!(errors.contains_key("amount"));
    }

    #[test]
    fn form_payload_uses_camel_case_keys() {
        let parsed: InvoiceForm =
            serde_json::from_str(r#"{"customerId":"abc","amount":"1","status":"paid"}"#).unwrap();
        assert_eq!(parsed.customer_id, "abc");
    }

    #[test]
    fn edit_dto_converts_cents_to_major_units() {
        let entity = InvoiceEntity {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            amount: 4250,
            status: "pending".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert_eq!(InvoiceFormDto::from(entity).amount, 42.5);
    }
}
