//! MySQL document store - JSON documents in a single `documents` table
//!
//! Every document is one row keyed by `(container, partition_key, id)`. The
//! body is stored as text and parsed back into JSON on read; the store does
//! not look inside it.

use super::{DocumentStore, StoreError, prepare_document};
use chrono::Utc;
use serde_json::Value;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::time::Duration;
use tracing::{debug, info, instrument};

const CREATE_DOCUMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        container VARCHAR(255) NOT NULL,
        partition_key VARCHAR(255) NOT NULL,
        id VARCHAR(255) NOT NULL,
        body LONGTEXT NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        PRIMARY KEY (container, partition_key, id)
    )
"#;

pub struct MySqlDocumentStore {
    connection_pool: MySqlPool,
}

impl MySqlDocumentStore {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Opens a connection pool and makes sure the documents table exists
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connection_lifetime: Duration,
    ) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .max_lifetime(connection_lifetime)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        info!("Connected to MySQL document store");
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_DOCUMENTS_TABLE)
            .execute(&self.connection_pool)
            .await?;
        Ok(())
    }

    async fn exists(&self, container: &str, partition_key: &str, id: &str) -> Result<bool, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE container = ? AND partition_key = ? AND id = ?",
        )
        .bind(container)
        .bind(partition_key)
        .bind(id)
        .fetch_one(&self.connection_pool)
        .await?;
        Ok(count > 0)
    }
}

impl DocumentStore for MySqlDocumentStore {
    #[instrument(skip(self))]
    async fn read_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, String>(
            "SELECT body FROM documents WHERE container = ? AND partition_key = ? AND id = ?",
        )
        .bind(container)
        .bind(partition_key)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        body.map(|body| serde_json::from_str(&body).map_err(StoreError::from))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn read_all_items(&self, container: &str) -> Result<Vec<Value>, StoreError> {
        let bodies = sqlx::query_scalar::<_, String>("SELECT body FROM documents WHERE container = ?")
            .bind(container)
            .fetch_all(&self.connection_pool)
            .await?;
        debug!("Scanned {} documents", bodies.len());

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    #[instrument(skip(self, document))]
    async fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let now = Utc::now();
        let document = prepare_document(id, document, now.timestamp())?;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (container, partition_key, id, body, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(container)
        .bind(partition_key)
        .bind(id)
        .bind(document.to_string())
        .bind(now)
        .execute(&self.connection_pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(StoreError::Conflict {
                    container: container.to_owned(),
                    id: id.to_owned(),
                })
            }
            Err(err) => Err(err.into()),
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
        let now = Utc::now();
        let document = prepare_document(id, document, now.timestamp())?;

        let result = sqlx::query(
            r#"
            UPDATE documents SET body = ?, updated_at = ?
            WHERE container = ? AND partition_key = ? AND id = ?
            "#,
        )
        .bind(document.to_string())
        .bind(now)
        .bind(container)
        .bind(partition_key)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        // MySQL counts changed rows, an identical rewrite reports 0
        if result.rows_affected() == 0 && !self.exists(container, partition_key, id).await? {
            return Err(StoreError::NotFound {
                container: container.to_owned(),
                id: id.to_owned(),
            });
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_item(
        &self,
        container: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE container = ? AND partition_key = ? AND id = ?",
        )
        .bind(container)
        .bind(partition_key)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
