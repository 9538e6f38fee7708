//! Payloads for creating, updating and listing customers.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerEmail, PersonName, TypeConstraintError};
use crate::forms::{FormError, double_option};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE};
use crate::repository::{CustomerListQuery, SortField, SortOrder};

const FIRST_NAME_REQUIRED: &str = "First name is required";
const FIRST_NAME_LENGTH: &str = "First name must be between 1 and 100 characters";
const LAST_NAME_REQUIRED: &str = "Last name is required";
const LAST_NAME_LENGTH: &str = "Last name must be between 1 and 100 characters";
const EMAIL_REQUIRED: &str = "Email is required";
const EMAIL_INVALID: &str = "Invalid email address";

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/customers`.
///
/// Required fields are `Option` so that a missing key is reported together
/// with every other offending field instead of failing deserialization.
pub struct CreateCustomerForm {
    #[validate(
        required(message = "First name is required"),
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Last name is required"),
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters")
    )]
    pub last_name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<CreateCustomerForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: CreateCustomerForm) -> Result<Self, Self::Error> {
        let form = CreateCustomerForm {
            first_name: trimmed(form.first_name),
            last_name: trimmed(form.last_name),
            email: trimmed(form.email),
            ..form
        };
        form.validate()?;

        let first_name = PersonName::new(form.first_name.unwrap_or_default()).map_err(|source| {
            FormError::InvalidField {
                field: "first_name",
                source,
            }
        })?;
        let last_name = PersonName::new(form.last_name.unwrap_or_default()).map_err(|source| {
            FormError::InvalidField {
                field: "last_name",
                source,
            }
        })?;
        let email = CustomerEmail::new(form.email.unwrap_or_default())
            .map_err(|source| FormError::InvalidField { field: "email", source })?;

        Ok(NewCustomer::new(
            first_name,
            last_name,
            email,
            form.phone_number,
            form.address,
            form.city,
            form.state,
            form.country,
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `PUT /api/customers/{id}`.
///
/// Every field is tri-state: omitted (untouched), `null`, or a value. The
/// identifier comes from the path; `id` and timestamps in the body are
/// ignored.
pub struct UpdateCustomerForm {
    #[serde(default, deserialize_with = "double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub country: Option<Option<String>>,
}

/// Validates a required name supplied in an update.
fn update_name(
    value: Option<Option<String>>,
    field: &'static str,
    required: &'static str,
    length: &'static str,
    errors: &mut ValidationErrors,
) -> Option<PersonName> {
    match value? {
        None => {
            errors.add(field, violation("required", required));
            None
        }
        Some(name) => match PersonName::new(name) {
            Ok(name) => Some(name),
            Err(TypeConstraintError::EmptyString) => {
                errors.add(field, violation("required", required));
                None
            }
            Err(_) => {
                errors.add(field, violation("length", length));
                None
            }
        },
    }
}

impl TryFrom<UpdateCustomerForm> for UpdateCustomer {
    type Error = FormError;

    fn try_from(form: UpdateCustomerForm) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let first_name = update_name(
            form.first_name,
            "first_name",
            FIRST_NAME_REQUIRED,
            FIRST_NAME_LENGTH,
            &mut errors,
        );
        let last_name = update_name(
            form.last_name,
            "last_name",
            LAST_NAME_REQUIRED,
            LAST_NAME_LENGTH,
            &mut errors,
        );
        let email = match form.email {
            None => None,
            Some(None) => {
                errors.add("email", violation("required", EMAIL_REQUIRED));
                None
            }
            Some(Some(email)) => match CustomerEmail::new(email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.add("email", violation("email", EMAIL_INVALID));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(FormError::Validation(errors));
        }

        Ok(UpdateCustomer {
            first_name,
            last_name,
            email,
            phone_number: UpdateCustomer::optional(form.phone_number),
            address: UpdateCustomer::optional(form.address),
            city: UpdateCustomer::optional(form.city),
            state: UpdateCustomer::optional(form.state),
            country: UpdateCustomer::optional(form.country),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Query string of `GET /api/customers`.
pub struct ListCustomersForm {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ListCustomersForm> for CustomerListQuery {
    type Error = FormError;

    fn try_from(form: ListCustomersForm) -> Result<Self, Self::Error> {
        let mut errors = match form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let sort_by = match form.sort_by.as_deref().map(str::trim) {
            None | Some("") => Some(SortField::default()),
            Some(name) => SortField::from_api_name(name),
        };
        if sort_by.is_none() {
            errors.add(
                "sort_by",
                violation(
                    "sort_by",
                    "Sort field must be one of firstName, lastName, email, phoneNumber, address, city, state, country, createdAt, updatedAt",
                ),
            );
        }

        let order = match form.order.as_deref().map(str::trim) {
            None | Some("") => Some(SortOrder::default()),
            Some(name) => SortOrder::from_api_name(name),
        };
        if order.is_none() {
            errors.add("order", violation("order", "Order must be either asc or desc"));
        }

        match (sort_by, order) {
            (Some(sort_by), Some(order)) if errors.is_empty() => {
                let page = form
                    .page
                    .map_or(DEFAULT_PAGE, |page| usize::try_from(page).unwrap_or(usize::MAX));
                let limit = form.limit.map_or(DEFAULT_ITEMS_PER_PAGE, |limit| {
                    usize::try_from(limit).unwrap_or(usize::MAX)
                });

                let mut query = CustomerListQuery::new()
                    .sort(sort_by, order)
                    .paginate(page, limit);
                if let Some(search) = form.search {
                    query = query.search(search);
                }
                Ok(query)
            }
            _ => Err(FormError::Validation(errors)),
        }
    }
}
