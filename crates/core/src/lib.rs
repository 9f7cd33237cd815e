//! Core types, schema validation and pagination for the contact service.

pub mod contact;
pub mod error;
pub mod filter;
pub mod limits;
pub mod pagination;
pub mod schema;

pub use contact::*;
pub use error::{Error, Result};
pub use filter::ContactFilter;
pub use pagination::Pagination;
pub use schema::{validate_contact, validate_update, FieldError, ValidationFailure};
