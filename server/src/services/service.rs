//! Generic service - pass-through layer between handlers and repositories
//!
//! Every operation is forwarded unchanged. Business rules that need to run
//! around persistence (authorization, side effects, coordination between
//! entities) belong here, so handlers and repositories stay untouched.

use crate::entities::Entity;
use crate::repositories::{Crud, RepositoryError};
use std::marker::PhantomData;
use tracing::instrument;

pub struct Service<T, R> {
    repository: R,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, R: Crud<T>> Service<T, R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self, predicate))]
    pub async fn get_by_condition<P>(&self, predicate: P) -> Result<Vec<T>, RepositoryError>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.repository.get_by_condition(predicate).await
    }

    #[instrument(skip(self, entity))]
    pub async fn create(&self, entity: T) -> Result<T, RepositoryError> {
        self.repository.create(entity).await
    }

    #[instrument(skip(self, entity), fields(id = ?entity.id()))]
    pub async fn update(&self, entity: T) -> Result<T, RepositoryError> {
        self.repository.update(entity).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.repository.delete(id).await
    }
}
