//! Device-local key/value storage.
//!
//! One SQLite table stands in for the browser/device storage the anonymous
//! identities live in. The trait keeps callers independent of the backing:
//! [`SqliteStore`] for real devices, [`MemoryStore`] for tests and for
//! environments without a writable filesystem.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::Result;

#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite-backed store, one `local_kv` table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the local database and ensure the table
    /// exists.
    pub async fn open(database_url: &str) -> Result<Self> {
        let url = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite:{database_url}")
        };

        let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
        // One connection is plenty for a key/value table, and it keeps
        // `sqlite::memory:` databases coherent across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS local_kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        )
        .execute(&pool)
        .await?;

        info!("Local store ready at {url}");
        Ok(Self { pool })
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM local_kv WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO local_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-memory store for tests and storage-less environments.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.map.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sqlite_store_round_trips() {
        let store = SqliteStore::open("sqlite::memory:").await.unwrap();
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.put("anonymous_id_test", "abc-123").await.unwrap();
        assert_eq!(
            store.get("anonymous_id_test").await.unwrap().as_deref(),
            Some("abc-123")
        );

        // Upsert overwrites.
        store.put("anonymous_id_test", "def-456").await.unwrap();
        assert_eq!(
            store.get("anonymous_id_test").await.unwrap().as_deref(),
            Some("def-456")
        );
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        store.put("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
