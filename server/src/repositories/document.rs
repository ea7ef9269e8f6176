//! DocumentRepository - generic CRUD over one container of a document store
//!
//! Documents are partitioned by id. Mutations are followed by a point read so
//! that callers always get the stored copy back, including anything the store
//! adds or normalizes (e.g. the `_ts` system property). That costs one extra
//! round trip per write.

use super::{Create, Delete, Operation, Read, ReadMany, RepositoryError, Update};
use crate::entities::Entity;
use crate::store::{DocumentStore, StoreError};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct DocumentRepository<T, S> {
    store: Arc<S>,
    container: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, S: DocumentStore> DocumentRepository<T, S> {
    /// Repository over the entity's own container
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            container: T::CONTAINER,
            _entity: PhantomData,
        }
    }

    pub fn container(&self) -> &'static str {
        self.container
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn decode(document: Value, operation: Operation, id: Option<&str>) -> Result<T, RepositoryError> {
        serde_json::from_value(document)
            .map_err(|err| RepositoryError::persistence(operation, id, err))
    }

    fn encode(entity: &T, operation: Operation, id: &str) -> Result<Value, RepositoryError> {
        serde_json::to_value(entity).map_err(|err| RepositoryError::persistence(operation, Some(id), err))
    }

    /// Point read after a write; the document must be there
    async fn read_back(&self, operation: Operation, id: &str) -> Result<T, RepositoryError> {
        let document = self
            .store
            .read_item(self.container, id, id)
            .await
            .map_err(|err| RepositoryError::persistence(operation, Some(id), err))?
            .ok_or_else(|| {
                RepositoryError::persistence(
                    operation,
                    Some(id),
                    StoreError::NotFound {
                        container: self.container.to_owned(),
                        id: id.to_owned(),
                    },
                )
            })?;
        Self::decode(document, operation, Some(id))
    }
}

impl<T: Entity, S: DocumentStore> Read<T> for DocumentRepository<T, S> {
    #[instrument(skip(self), fields(container = self.container))]
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        debug!("Reading document");
        let document = self
            .store
            .read_item(self.container, id, id)
            .await
            .map_err(|err| RepositoryError::persistence(Operation::Read, Some(id), err))?;

        document
            .map(|doc| Self::decode(doc, Operation::Read, Some(id)))
            .transpose()
    }
}

impl<T: Entity, S: DocumentStore> ReadMany<T> for DocumentRepository<T, S> {
    #[instrument(skip(self), fields(container = self.container))]
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let documents = self
            .store
            .read_all_items(self.container)
            .await
            .map_err(|err| RepositoryError::persistence(Operation::Scan, None, err))?;
        debug!("Decoding {} documents", documents.len());

        documents
            .into_iter()
            .map(|doc| Self::decode(doc, Operation::Scan, None))
            .collect()
    }

    #[instrument(skip(self, predicate), fields(container = self.container))]
    async fn get_by_condition<P>(&self, predicate: P) -> Result<Vec<T>, RepositoryError>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let matching: Vec<T> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect();
        debug!("{} documents matched the condition", matching.len());
        Ok(matching)
    }
}

impl<T: Entity, S: DocumentStore> Create<T> for DocumentRepository<T, S> {
    #[instrument(skip(self, entity), fields(container = self.container))]
    async fn create(&self, mut entity: T) -> Result<T, RepositoryError> {
        let provided = entity.id().filter(|id| !id.is_empty()).map(str::to_owned);
        let id = match provided {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                debug!(id = %id, "Generated new id");
                entity.set_id(id.clone());
                id
            }
        };

        let document = Self::encode(&entity, Operation::Create, &id)?;
        self.store
            .create_item(self.container, &id, &id, document)
            .await
            .map_err(|err| RepositoryError::persistence(Operation::Create, Some(id.as_str()), err))?;

        info!(id = %id, "Document created");
        self.read_back(Operation::Create, &id).await
    }
}

impl<T: Entity, S: DocumentStore> Update<T> for DocumentRepository<T, S> {
    #[instrument(skip(self, entity), fields(container = self.container))]
    async fn update(&self, entity: T) -> Result<T, RepositoryError> {
        let id = entity
            .id()
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .ok_or(RepositoryError::MissingId {
                operation: Operation::Update,
            })?;

        // Unconditional replace: concurrent writers on the same id, last one wins
        let document = Self::encode(&entity, Operation::Update, &id)?;
        self.store
            .replace_item(self.container, &id, &id, document)
            .await
            .map_err(|err| RepositoryError::persistence(Operation::Update, Some(id.as_str()), err))?;

        info!(id = %id, "Document replaced");
        self.read_back(Operation::Update, &id).await
    }
}

impl<T: Entity, S: DocumentStore> Delete for DocumentRepository<T, S> {
    #[instrument(skip(self), fields(container = self.container))]
    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let existing = self
            .store
            .read_item(self.container, id, id)
            .await
            .map_err(|err| RepositoryError::persistence(Operation::Delete, Some(id), err))?;
        if existing.is_none() {
            debug!("No document stored under this id, removal is a no-op");
        }

        let removed = self
            .store
            .delete_item(self.container, id, id)
            .await
            .map_err(|err| RepositoryError::persistence(Operation::Delete, Some(id), err))?;

        if removed {
            info!("Document deleted");
        } else if existing.is_some() {
            warn!("Document disappeared before it could be deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Address, Department, Employee};
    use crate::store::InMemoryDocumentStore;
    use rust_decimal::Decimal;

    fn repository() -> DocumentRepository<Employee, InMemoryDocumentStore> {
        DocumentRepository::new(Arc::new(InMemoryDocumentStore::new()))
    }

    fn employee(name: &str, department: &str, salary: i64) -> Employee {
        Employee {
            id: None,
            name: Some(name.to_string()),
            position: Some("BSA".to_string()),
            salary: Decimal::from(salary),
            department: Some(Department {
                department_id: 1,
                department_name: department.to_string(),
            }),
            address: Some(Address {
                street: "123 Main St".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip_code: "12345".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_create_generates_id_and_matches_fresh_read() {
        let repo = repository();
        let created = repo.create(employee("John Doe", "HR", 50000)).await.unwrap();

        let id = created.id.clone().unwrap();
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(&id).is_ok());

        let fetched = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn test_create_keeps_caller_id_and_replaces_empty_one() {
        let repo = repository();
        let mut given = employee("A", "HR", 1);
        given.id = Some("emp-1".to_string());
        assert_eq!(repo.create(given).await.unwrap().id.as_deref(), Some("emp-1"));

        let mut empty = employee("B", "HR", 1);
        empty.id = Some(String::new());
        let created = repo.create(empty).await.unwrap();
        assert!(created.id.as_deref().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_create_with_duplicate_id_is_persistence_error() {
        let repo = repository();
        let mut first = employee("A", "HR", 1);
        first.id = Some("dup".to_string());
        repo.create(first.clone()).await.unwrap();

        let err = repo.create(first).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Persistence {
                operation: Operation::Create,
                source: StoreError::Conflict { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let repo = repository();
        let created = repo.create(employee("A", "HR", 1)).await.unwrap();
        let id = created.id.unwrap();

        let first = repo.get_by_id(&id).await.unwrap();
        let second = repo.get_by_id(&id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_by_id_absent_is_none() {
        let repo = repository();
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_and_returns_fresh_read() {
        let repo = repository();
        let created = repo.create(employee("A", "HR", 1)).await.unwrap();
        let id = created.id.clone().unwrap();

        let mut changed = created;
        changed.name = Some("Renamed".to_string());
        changed.salary = Decimal::from(2);
        let updated = repo.update(changed).await.unwrap();

        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(updated.name.as_deref(), Some("Renamed"));
        assert_eq!(repo.get_by_id(&id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_or_missing_id_fails() {
        let repo = repository();
        let mut ghost = employee("A", "HR", 1);
        ghost.id = Some("ghost".to_string());
        let err = repo.update(ghost).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Persistence {
                source: StoreError::NotFound { .. },
                ..
            }
        ));

        let err = repo.update(employee("B", "HR", 1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::MissingId { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_read_is_none_and_repeat_is_noop() {
        let repo = repository();
        let created = repo.create(employee("A", "HR", 1)).await.unwrap();
        let id = created.id.unwrap();

        repo.delete(&id).await.unwrap();
        assert!(repo.get_by_id(&id).await.unwrap().is_none());
        repo.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_all_and_condition() {
        let repo = repository();
        repo.create(employee("A", "HR", 10)).await.unwrap();
        repo.create(employee("B", "IT", 20)).await.unwrap();
        repo.create(employee("C", "IT", 30)).await.unwrap();

        assert_eq!(repo.get_all().await.unwrap().len(), 3);

        let mut it: Vec<String> = repo
            .get_by_condition(|e: &Employee| {
                e.department.as_ref().is_some_and(|d| d.department_name == "IT")
            })
            .await
            .unwrap()
            .into_iter()
            .filter_map(|e| e.name)
            .collect();
        it.sort();
        assert_eq!(it, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_store_metadata_is_added_on_write() {
        let repo = repository();
        let created = repo.create(employee("A", "HR", 1)).await.unwrap();
        let id = created.id.unwrap();

        let raw = repo
            .store()
            .read_item(repo.container(), &id, &id)
            .await
            .unwrap()
            .unwrap();
        assert!(raw.get("_ts").is_some());
        assert_eq!(repo.container(), "Employee");
    }
}
