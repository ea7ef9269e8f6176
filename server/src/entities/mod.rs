//! Entities module - documents persisted through the generic repository
//!
//! Every entity implements [`Entity`], which provides the identifier (also
//! used as partition key) and the container it is stored in.

pub mod employee;
pub mod entity;

pub use employee::{Address, Department, Employee};
pub use entity::Entity;
