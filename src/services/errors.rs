//! Error taxonomy produced by the service layer.
//!
//! Every failure a caller can observe is one of the [`ServiceError`]
//! variants; the HTTP boundary maps each variant to a status code without
//! inspecting message text.

use serde::Serialize;
use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// A single offending input field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request carried malformed or missing data.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The referenced customer id has no matching row.
    #[error("Customer with id {0} not found")]
    NotFound(String),

    /// The email is already held by another customer.
    #[error("Customer with email {0} already exists")]
    Conflict(String),

    /// Anything else; the detail is for logs only.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Storage failures that a service did not classify are unexpected.
impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
