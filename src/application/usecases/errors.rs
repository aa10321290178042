use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::form_state::{FieldErrors, FormState};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{message}")]
    Validation { errors: FieldErrors, message: String },
    #[error("{0} not found.")]
    NotFound(&'static str),
    #[error("Failed to fetch {what}.")]
    Fetch {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("Database Error: Failed to {action}.")]
    Storage {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl DashboardError {
    pub fn fetch(what: &'static str, source: anyhow::Error) -> Self {
        DashboardError::Fetch { what, source }
    }

    pub fn storage(action: &'static str, source: anyhow::Error) -> Self {
        DashboardError::Storage { action, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Fetch { .. } | DashboardError::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The payload a form re-renders with. Field errors are only present for validation failures.
    pub fn form_state(&self) -> FormState {
        match self {
            DashboardError::Validation { errors, message } => FormState {
                errors: errors.clone(),
                message: Some(message.clone()),
            },
            other => FormState {
                errors: FieldErrors::new(),
                message: Some(other.to_string()),
            },
        }
    }
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

/// What the caller should do once a mutation has been committed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationOutcome {
    Redirect { to: &'static str },
    Message { message: String },
}
