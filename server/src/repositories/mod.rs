//! Repositories module - typed CRUD on top of the document store
//!
//! The traits in [`traits`] describe the operations; [`DocumentRepository`]
//! implements them for any [`Entity`](crate::entities::Entity) over any
//! [`DocumentStore`](crate::store::DocumentStore).

pub mod document;
pub mod error;
pub mod traits;

pub use document::DocumentRepository;
pub use error::{Operation, RepositoryError};
pub use traits::{Create, Crud, Delete, Read, ReadMany, Update};
