//! Store errors - failures reported by a document store backend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document `{id}` already exists in container `{container}`")]
    Conflict { container: String, id: String },

    #[error("document `{id}` does not exist in container `{container}`")]
    NotFound { container: String, id: String },

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store misconfigured: {0}")]
    Configuration(String),
}
