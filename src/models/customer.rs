use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::types::{CustomerEmail, PersonName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(QueryableByName)]
pub struct CustomerCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub id: String,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub country: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Data used when updating a [`Customer`] record.
///
/// Outer `None` skips the column; `Some(None)` writes `NULL`.
pub struct UpdateCustomer<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone_number: Option<Option<&'a str>>,
    pub address: Option<Option<&'a str>>,
    pub city: Option<Option<&'a str>>,
    pub state: Option<Option<&'a str>>,
    pub country: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: customer.id.parse()?,
            first_name: PersonName::new(customer.first_name)?,
            last_name: PersonName::new(customer.last_name)?,
            email: CustomerEmail::new(customer.email)?,
            phone_number: customer.phone_number,
            address: customer.address,
            city: customer.city,
            state: customer.state,
            country: customer.country,
            created_at: customer.created_at.and_utc(),
            updated_at: customer.updated_at.and_utc(),
        })
    }
}

impl<'a> NewCustomer<'a> {
    /// Builds the insertable row, assigning a fresh id and timestamps.
    pub fn from_domain(customer: &'a DomainNewCustomer, now: NaiveDateTime) -> Self {
        Self {
            id: crate::domain::types::CustomerId::new().to_string(),
            first_name: customer.first_name.as_str(),
            last_name: customer.last_name.as_str(),
            email: customer.email.as_str(),
            phone_number: customer.phone_number.as_deref(),
            address: customer.address.as_deref(),
            city: customer.city.as_deref(),
            state: customer.state.as_deref(),
            country: customer.country.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateCustomer<'a> {
    /// Builds the changeset, refreshing `updated_at`.
    pub fn from_domain(updates: &'a DomainUpdateCustomer, now: NaiveDateTime) -> Self {
        Self {
            first_name: updates.first_name.as_ref().map(PersonName::as_str),
            last_name: updates.last_name.as_ref().map(PersonName::as_str),
            email: updates.email.as_ref().map(CustomerEmail::as_str),
            phone_number: updates.phone_number.as_ref().map(Option::as_deref),
            address: updates.address.as_ref().map(Option::as_deref),
            city: updates.city.as_ref().map(Option::as_deref),
            state: updates.state.as_ref().map(Option::as_deref),
            country: updates.country.as_ref().map(Option::as_deref),
            updated_at: now,
        }
    }
}
