//! Core module - infrastructure shared by the whole server
//!
//! - Configuration
//! - Error handling at the HTTP boundary
//! - Application state

pub mod config;
pub mod error;
pub mod state;

pub use config::{Config, StoreBackend};
pub use error::AppError;
pub use state::{AppState, EmployeeService};
