//! HTTP handlers and the translation of service errors into responses.

pub mod customers;
pub mod errors;
pub mod main;
