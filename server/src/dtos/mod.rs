//! DTOs module - Data Transfer Objects
//!
//! Employees travel over the wire as the entity itself; only the listing
//! filters need their own shape.

pub mod query;

pub use query::EmployeeQuery;
