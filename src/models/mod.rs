//! Database models shared across the CRM repository.

pub mod customer;
#[cfg(feature = "server")]
pub mod config;
