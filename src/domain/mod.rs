//! Domain aggregates exposed by the CRM service layer.

pub mod customer;
pub mod types;
