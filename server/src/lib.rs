//! Employee server library - exposes the modules and the router for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod handlers;
pub mod repositories;
pub mod services;
pub mod store;
pub mod validation;

// Re-export of the main types to make imports easier
pub use crate::core::{AppError, AppState, Config};

use axum::{Router, routing::get};
use std::sync::Arc;
use store::DocumentStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router
pub fn create_router<S: DocumentStore>(state: Arc<AppState<S>>) -> Router {
    use handlers::root;

    Router::new()
        .route("/", get(root))
        .nest("/employees", configure_employee_routes::<S>())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes for the employee CRUD
fn configure_employee_routes<S: DocumentStore>() -> Router<Arc<AppState<S>>> {
    use handlers::*;

    Router::new()
        .route("/", get(list_employees::<S>).post(create_employee::<S>))
        .route(
            "/{id}",
            get(get_employee_by_id::<S>)
                .put(update_employee::<S>)
                .delete(delete_employee::<S>),
        )
}
