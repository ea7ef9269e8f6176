//! Services module - orchestration between HTTP handlers and repositories

pub mod service;

pub use service::Service;
