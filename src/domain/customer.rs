use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerEmail, CustomerId, PersonName, normalize_optional_text};

/// A persisted customer record.
///
/// Timestamps are UTC and serialize as RFC 3339 with a `Z` suffix.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: CustomerEmail,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new customer.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: CustomerEmail,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl NewCustomer {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: CustomerEmail,
        phone_number: Option<String>,
        address: Option<String>,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone_number: normalize_optional_text(phone_number),
            address: normalize_optional_text(address),
            city: normalize_optional_text(city),
            state: normalize_optional_text(state),
            country: normalize_optional_text(country),
        }
    }
}

/// Partial update of a customer.
///
/// `None` leaves a column untouched. For optional columns `Some(None)` clears
/// the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCustomer {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<CustomerEmail>,
    pub phone_number: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub country: Option<Option<String>>,
}

impl UpdateCustomer {
    /// Sets an optional column, normalizing blank values to "no value".
    pub fn optional(value: Option<Option<String>>) -> Option<Option<String>> {
        value.map(normalize_optional_text)
    }

    /// Returns `true` when no column would change.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_normalizes_blank_optionals() {
        let customer = NewCustomer::new(
            PersonName::new("Ann").unwrap(),
            PersonName::new("Lee").unwrap(),
            CustomerEmail::new("ann@x.com").unwrap(),
            Some("".to_string()),
            Some(" 1 Main St ".to_string()),
            None,
            Some("   ".to_string()),
            Some("France".to_string()),
        );

        assert_eq!(customer.phone_number, None);
        assert_eq!(customer.address.as_deref(), Some("1 Main St"));
        assert_eq!(customer.city, None);
        assert_eq!(customer.state, None);
        assert_eq!(customer.country.as_deref(), Some("France"));
    }

    #[test]
    fn update_optional_distinguishes_omitted_from_cleared() {
        assert_eq!(UpdateCustomer::optional(None), None);
        assert_eq!(UpdateCustomer::optional(Some(None)), Some(None));
        assert_eq!(UpdateCustomer::optional(Some(Some("".into()))), Some(None));
        assert_eq!(
            UpdateCustomer::optional(Some(Some("Lyon".into()))),
            Some(Some("Lyon".to_string()))
        );
    }

    #[test]
    fn customer_serializes_with_camel_case_keys() {
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            first_name: PersonName::new("Ann").unwrap(),
            last_name: PersonName::new("Lee").unwrap(),
            email: CustomerEmail::new("ann@x.com").unwrap(),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            country: None,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["firstName"], "Ann");
        assert_eq!(value["email"], "ann@x.com");
        assert!(value["phoneNumber"].is_null());
        let created_at = value["createdAt"].as_str().unwrap();
        assert!(created_at.ends_with('Z'), "{created_at}");
        assert_eq!(value["id"], customer.id.to_string());
    }
}
