//! Common repository traits
//!
//! This module defines the generic interfaces for document operations. Every
//! entity is addressed by its string id, which is also its partition key.

use super::RepositoryError;
use std::future::Future;

/// Trait for creating new entities
pub trait Create<Entity> {
    /// Creates a new entity
    ///
    /// # Arguments
    /// * `entity` - Entity to store; an id is generated when it has none
    ///
    /// # Returns
    /// * `Ok(Entity)` - The entity as read back from the store after the write
    /// * `Err(RepositoryError)` - Error during insertion (e.g. duplicate id)
    fn create(&self, entity: Entity) -> impl Future<Output = Result<Entity, RepositoryError>> + Send;
}

/// Trait for reading a single entity by id
pub trait Read<Entity> {
    /// Reads an entity by its id
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that id
    /// * `Err(RepositoryError)` - Error during reading
    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<Option<Entity>, RepositoryError>> + Send;
}

/// Trait for reading many entities at once
pub trait ReadMany<Entity> {
    /// Reads every entity of the collection
    ///
    /// # Note
    /// Entities are returned in the order the store yields them; no sorting
    /// is applied.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Entity>, RepositoryError>> + Send;

    /// Reads the entities matching `predicate`, evaluated on each entity
    fn get_by_condition<P>(
        &self,
        predicate: P,
    ) -> impl Future<Output = Result<Vec<Entity>, RepositoryError>> + Send
    where
        P: Fn(&Entity) -> bool + Send + Sync + 'static;
}

/// Trait for updating existing entities
pub trait Update<Entity> {
    /// Replaces the stored entity carrying the same id
    ///
    /// # Returns
    /// * `Ok(Entity)` - The entity as read back from the store after the write
    /// * `Err(RepositoryError)` - Missing id, unknown id or store failure
    fn update(&self, entity: Entity) -> impl Future<Output = Result<Entity, RepositoryError>> + Send;
}

/// Trait for deleting entities
pub trait Delete {
    /// Deletes the entity with the given id
    ///
    /// # Returns
    /// * `Ok(())` - Deletion done, or nothing was stored under that id
    /// * `Err(RepositoryError)` - Error during deletion
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Full CRUD surface, implemented by anything providing all the traits above
pub trait Crud<Entity>:
    Create<Entity> + Read<Entity> + ReadMany<Entity> + Update<Entity> + Delete + Send + Sync
{
}

impl<Entity, R> Crud<Entity> for R where
    R: Create<Entity> + Read<Entity> + ReadMany<Entity> + Update<Entity> + Delete + Send + Sync
{
}
