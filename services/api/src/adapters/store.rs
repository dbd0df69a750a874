//! services/api/src/adapters/store.rs
//!
//! This module contains the blob store adapter, the concrete implementation
//! of the `EntryStore` and `ShareStore` ports from the `core` crate. The
//! journal is persisted the way the application treats it: one keyed JSONB
//! blob holding the whole entry collection, overwritten wholesale on every
//! mutation, with share records living under their own `share_{id}` keys in
//! the same table.

use async_trait::async_trait;
use reflection_core::domain::{Entry, ShareRecord};
use reflection_core::ports::{EntryStore, PortError, PortResult, ShareStore};
use sqlx::PgPool;

/// The key the whole entry collection is stored under.
const ENTRIES_KEY: &str = "reflection-timeline-entries";

/// A Postgres-backed keyed blob store implementing the persistence ports.
#[derive(Clone)]
pub struct BlobStoreAdapter {
    pool: PgPool,
}

impl BlobStoreAdapter {
    /// Creates a new `BlobStoreAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn read_blob(&self, key: &str) -> PortResult<Option<serde_json::Value>> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT payload FROM blobs WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(row.map(|(payload,)| payload))
    }

    async fn write_blob(&self, key: &str, payload: serde_json::Value) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO blobs (key, payload) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET payload = EXCLUDED.payload, updated_at = now()",
        )
        .bind(key)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn delete_blob(&self, key: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM blobs WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl EntryStore for BlobStoreAdapter {
    /// Loads the whole collection. An absent row or a payload that no
    /// longer deserializes both read as an empty collection.
    async fn load(&self) -> PortResult<Vec<Entry>> {
        Ok(self
            .read_blob(ENTRIES_KEY)
            .await?
            .and_then(|payload| serde_json::from_value(payload).ok())
            .unwrap_or_default())
    }

    async fn save(&self, entries: &[Entry]) -> PortResult<()> {
        let payload =
            serde_json::to_value(entries).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.write_blob(ENTRIES_KEY, payload).await
    }
}

#[async_trait]
impl ShareStore for BlobStoreAdapter {
    async fn get(&self, share_id: &str) -> PortResult<Option<ShareRecord>> {
        Ok(self
            .read_blob(&share_key(share_id))
            .await?
            .and_then(|payload| serde_json::from_value(payload).ok()))
    }

    async fn put(&self, record: &ShareRecord) -> PortResult<()> {
        let payload =
            serde_json::to_value(record).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.write_blob(&share_key(&record.share_id), payload).await
    }

    async fn remove(&self, share_id: &str) -> PortResult<()> {
        self.delete_blob(&share_key(share_id)).await
    }
}

fn share_key(share_id: &str) -> String {
    format!("share_{share_id}")
}
