//! Business logic sitting between HTTP handlers and the repository.

pub mod customer;
pub mod errors;

pub use errors::{FieldViolation, ServiceError, ServiceResult};
