//! Handlers module - HTTP endpoints
//!
//! Handlers are generic over the document store so the router can be built
//! on any backend.

pub mod employee;

pub use employee::{
    create_employee, delete_employee, get_employee_by_id, list_employees, update_employee,
};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
