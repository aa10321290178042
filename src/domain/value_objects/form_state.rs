use std::collections::BTreeMap;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Form field name as submitted (`customerId`) -> human readable messages, in field order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// What a rejected form submission sends back to be re-rendered inline.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FormState {
    pub errors: FieldErrors,
    pub message: Option<String>,
}

pub fn flatten_validation_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors.iter().map(message_of).collect();
            (wire_field_name(field), messages)
        })
        .collect()
}

pub fn single_field_error(field: &str, error: &ValidationError) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(wire_field_name(field), vec![message_of(error)]);
    errors
}

pub(crate) fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Struct fields are snake_case; forms submit them camelCase.
fn wire_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            name.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            name.push(ch);
        }
    }
    name
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_keyed_by_submitted_field_names() {
        let err = validation_error("invalid_customer", "Please select a customer.");
        let errors = single_field_error("customer_id", &err);

        assert_eq!(
            errors.get("customerId"),
            Some(&vec!["Please select a customer.".to_string()])
        );
        assert!(!errors.contains_key("customer_id"));
        assert_eq!(wire_field_name("amount"), "amount");
    }
}
