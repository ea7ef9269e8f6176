//! Application state shared by every handler

use crate::entities::Employee;
use crate::repositories::DocumentRepository;
use crate::services::Service;
use crate::store::{AnyDocumentStore, DocumentStore};
use std::sync::Arc;

/// Service handling employees on top of store `S`
pub type EmployeeService<S> = Service<Employee, DocumentRepository<Employee, S>>;

/// State handed to the router; `S` is the document store backend
pub struct AppState<S: DocumentStore = AnyDocumentStore> {
    pub employees: EmployeeService<S>,
}

impl<S: DocumentStore> AppState<S> {
    /// Wires repository and service over the given store
    pub fn new(store: S) -> Self {
        let store = Arc::new(store);
        Self {
            employees: Service::new(DocumentRepository::new(store)),
        }
    }
}
