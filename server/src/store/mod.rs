//! Document store - the driver seam below the repositories
//!
//! A store keeps JSON documents grouped in containers and routed by a
//! partition key. It knows nothing about entity types: the repository
//! serializes entities before handing them over. Every write stamps a
//! store-managed `_ts` system property (Unix seconds) on the document.

pub mod error;
pub mod memory;
pub mod mysql;

pub use error::StoreError;
pub use memory::InMemoryDocumentStore;
pub use mysql::MySqlDocumentStore;

use crate::core::config::{Config, StoreBackend};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Point and scan access to partitioned JSON documents.
///
/// Writes are committed when the returned future resolves; there is no
/// batching and no retry.
pub trait DocumentStore: Send + Sync + 'static {
    /// Point read. `Ok(None)` when no document has that id.
    fn read_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Every document of the container, in the store's natural order
    fn read_all_items(
        &self,
        container: &str,
    ) -> impl Future<Output = Result<Vec<Value>, StoreError>> + Send;

    /// Inserts a new document, [`StoreError::Conflict`] if the id is taken
    fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Overwrites an existing document, [`StoreError::NotFound`] if absent
    fn replace_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes a document, returning whether one existed
    fn delete_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Checks the document shape and stamps the `_ts` system property
pub(crate) fn prepare_document(id: &str, mut document: Value, ts: i64) -> Result<Value, StoreError> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| StoreError::Malformed("document must be a JSON object".to_string()))?;

    match object.get("id").and_then(Value::as_str) {
        Some(doc_id) if doc_id == id => {}
        _ => {
            return Err(StoreError::Malformed(format!(
                "document id does not match `{id}`"
            )));
        }
    }

    object.insert("_ts".to_string(), Value::from(ts));
    Ok(document)
}

/// Backend chosen at startup from the configuration
pub enum AnyDocumentStore {
    Memory(InMemoryDocumentStore),
    MySql(MySqlDocumentStore),
}

impl AnyDocumentStore {
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        match config.store_backend {
            StoreBackend::Memory => Ok(Self::Memory(InMemoryDocumentStore::new())),
            StoreBackend::MySql => {
                let url = config.database_url.as_deref().ok_or_else(|| {
                    StoreError::Configuration(
                        "DATABASE_URL must be set when STORE_BACKEND=mysql".to_string(),
                    )
                })?;
                let store = MySqlDocumentStore::connect(
                    url,
                    config.max_connections,
                    Duration::from_secs(config.connection_lifetime_secs),
                )
                .await?;
                Ok(Self::MySql(store))
            }
        }
    }
}

impl DocumentStore for AnyDocumentStore {
    async fn read_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        match self {
            Self::Memory(store) => store.read_item(container, partition_key, id).await,
            Self::MySql(store) => store.read_item(container, partition_key, id).await,
        }
    }

    async fn read_all_items(&self, container: &str) -> Result<Vec<Value>, StoreError> {
        match self {
            Self::Memory(store) => store.read_all_items(container).await,
            Self::MySql(store) => store.read_all_items(container).await,
        }
    }

    async fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.create_item(container, partition_key, id, document).await,
            Self::MySql(store) => store.create_item(container, partition_key, id, document).await,
        }
    }

    async fn replace_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.replace_item(container, partition_key, id, document).await,
            Self::MySql(store) => store.replace_item(container, partition_key, id, document).await,
        }
    }

    async fn delete_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        match self {
            Self::Memory(store) => store.delete_item(container, partition_key, id).await,
            Self::MySql(store) => store.delete_item(container, partition_key, id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_document_stamps_ts() {
        let doc = prepare_document("a", json!({ "id": "a", "_ts": 1 }), 42).unwrap();
        assert_eq!(doc["_ts"], 42);
    }

    #[test]
    fn test_prepare_document_requires_matching_id() {
        assert!(prepare_document("a", json!({ "name": "x" }), 1).is_err());
        assert!(prepare_document("a", json!({ "id": "b" }), 1).is_err());
    }

    #[tokio::test]
    async fn test_memory_backend_from_default_config() {
        let config = Config::default();
        let store = AnyDocumentStore::from_config(&config).await.unwrap();
        assert!(matches!(store, AnyDocumentStore::Memory(_)));
    }

    #[tokio::test]
    async fn test_mysql_backend_requires_url() {
        let config = Config {
            store_backend: StoreBackend::MySql,
            database_url: None,
            ..Config::default()
        };
        let err = AnyDocumentStore::from_config(&config).await.err().unwrap();
        assert!(matches!(err, StoreError::Configuration(_)));
    }
}
