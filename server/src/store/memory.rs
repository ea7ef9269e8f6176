//! In-memory document store backed by a concurrent map

use super::{DocumentStore, StoreError, prepare_document};
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentKey {
    container: String,
    partition_key: String,
    id: String,
}

impl DocumentKey {
    fn new(container: &str, partition_key: &str, id: &str) -> Self {
        Self {
            container: container.to_owned(),
            partition_key: partition_key.to_owned(),
            id: id.to_owned(),
        }
    }
}

/// Documents live in a shared `DashMap`; clones share the same data.
/// Used for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<DashMap<DocumentKey, Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across every container
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self))]
    async fn read_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let key = DocumentKey::new(container, partition_key, id);
        Ok(self.documents.get(&key).map(|doc| doc.value().clone()))
    }

    #[instrument(skip(self))]
    async fn read_all_items(&self, container: &str) -> Result<Vec<Value>, StoreError> {
        let documents: Vec<Value> = self
            .documents
            .iter()
            .filter(|entry| entry.key().container == container)
            .map(|entry| entry.value().clone())
            .collect();
        debug!("Scanned {} documents", documents.len());
        Ok(documents)
    }

    #[instrument(skip(self, document))]
    async fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let document = prepare_document(id, document, Utc::now().timestamp())?;
        match self.documents.entry(DocumentKey::new(container, partition_key, id)) {
            Entry::Occupied(_) => Err(StoreError::Conflict {
                container: container.to_owned(),
                id: id.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(document);
                Ok(())
            }
        }
    }

    #[instrument(skip(self, document))]
    async fn replace_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let document = prepare_document(id, document, Utc::now().timestamp())?;
        match self
            .documents
            .get_mut(&DocumentKey::new(container, partition_key, id))
        {
            Some(mut existing) => {
                *existing = document;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                container: container.to_owned(),
                id: id.to_owned(),
            }),
        }
    }

    #[instrument(skip(self))]
    async fn delete_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        let key = DocumentKey::new(container, partition_key, id);
        Ok(self.documents.remove(&key).is_some())
    }
}
