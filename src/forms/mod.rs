//! Request payload definitions backing the CRM routes.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::services::{FieldViolation, ServiceError};

pub mod customer;

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid {field}: {source}")]
    InvalidField {
        field: &'static str,
        source: TypeConstraintError,
    },
}

impl FormError {
    /// Flattens the error into one entry per offending field, keyed by the
    /// API (camelCase) field name.
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    let field = api_field_name(&field.to_string());
                    errors.iter().map(move |error| {
                        let message = error
                            .message
                            .as_ref()
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                        FieldViolation::new(field.clone(), message)
                    })
                })
                .collect::<Vec<_>>(),
            FormError::InvalidField { field, source } => {
                vec![FieldViolation::new(api_field_name(field), source.to_string())]
            }
        };
        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        violations
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.violations())
    }
}

/// Converts a snake_case struct field name into the camelCase name used on
/// the wire. Already camelCase names pass through unchanged.
pub fn api_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Deserializes a field that distinguishes "absent" from `null`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`: an
/// omitted key yields `None`, an explicit `null` yields `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
