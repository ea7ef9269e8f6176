//! Repository errors

use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Repository operation, recorded in errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Scan,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Read => "read",
            Operation::Scan => "scan",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store rejected or failed the operation
    #[error("{operation} of `{}` failed: {source}", .id.as_deref().unwrap_or("*"))]
    Persistence {
        operation: Operation,
        id: Option<String>,
        #[source]
        source: StoreError,
    },

    #[error("{operation} requires an entity id")]
    MissingId { operation: Operation },
}

impl RepositoryError {
    pub fn persistence(operation: Operation, id: Option<&str>, source: impl Into<StoreError>) -> Self {
        RepositoryError::Persistence {
            operation,
            id: id.map(str::to_owned),
            source: source.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            RepositoryError::Persistence { operation, .. } => *operation,
            RepositoryError::MissingId { operation } => *operation,
        }
    }
}
