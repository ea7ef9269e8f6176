#![allow(dead_code)]

use axum_test::TestServer;
use employee_server::AppState;
use employee_server::store::{DocumentStore, InMemoryDocumentStore, StoreError};
use serde_json::{Value, json};
use std::sync::Arc;

/// AppState over a fresh in-memory store
pub fn create_test_state() -> Arc<AppState<InMemoryDocumentStore>> {
    Arc::new(AppState::new(InMemoryDocumentStore::new()))
}

/// TestServer running the full router
pub fn create_test_server<S: DocumentStore>(state: Arc<AppState<S>>) -> TestServer {
    let app = employee_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Body of a valid employee, as a client would send it
pub fn john_doe() -> Value {
    json!({
        "name": "John Doe",
        "position": "BSA",
        "salary": 50000,
        "department": { "departmentId": 1, "departmentName": "HR" },
        "address": {
            "street": "123 Main St",
            "city": "Anytown",
            "state": "CA",
            "zipCode": "12345"
        }
    })
}

/// Store whose every operation fails, as if the database were unreachable
pub struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

impl DocumentStore for UnavailableStore {
    async fn read_item(&self, _: &str, _: &str, _: &str) -> Result<Option<Value>, StoreError> {
        Err(unavailable())
    }

    async fn read_all_items(&self, _: &str) -> Result<Vec<Value>, StoreError> {
        Err(unavailable())
    }

    async fn create_item(&self, _: &str, _: &str, _: &str, _: Value) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn replace_item(&self, _: &str, _: &str, _: &str, _: Value) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn delete_item(&self, _: &str, _: &str, _: &str) -> Result<bool, StoreError> {
        Err(unavailable())
    }
}
