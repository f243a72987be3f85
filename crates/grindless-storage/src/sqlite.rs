// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`KeyValueStore`].
//!
//! All statements go through `tokio-rusqlite`'s single background thread, so
//! one `SqliteStore` is the only writer for its file.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;

use grindless_config::model::StorageConfig;
use grindless_core::{GrindlessError, KeyValueStore};

use crate::schema;

/// Convert a tokio-rusqlite error into GrindlessError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> GrindlessError {
    GrindlessError::storage(e)
}

/// SQLite-backed key/value store.
pub struct SqliteStore {
    conn: tokio_rusqlite::Connection,
    path: String,
}

impl SqliteStore {
    /// Open (or create) the store at `path`, creating parent directories.
    pub async fn open(path: &str) -> Result<Self, GrindlessError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(GrindlessError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(GrindlessError::storage)?;
        Self::init(conn, path.to_string()).await
    }

    /// Open the store configured in `[storage]`.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, GrindlessError> {
        Self::open(&config.database_path).await
    }

    /// An in-memory SQLite store, discarded on drop.
    pub async fn open_in_memory() -> Result<Self, GrindlessError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(GrindlessError::storage)?;
        Self::init(conn, ":memory:".to_string()).await
    }

    async fn init(conn: tokio_rusqlite::Connection, path: String) -> Result<Self, GrindlessError> {
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            schema::apply(conn)
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path = %path, "SQLite key/value store opened");
        Ok(Self { conn, path })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> Result<Vec<String>, GrindlessError> {
        self.conn
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, GrindlessError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                let result = conn.query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                );
                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), GrindlessError> {
        let key = key.to_string();
        let value = value.to_string();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                    params![key, value],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn remove(&self, key: &str) -> Result<(), GrindlessError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.set("@me.billing", r#"{"credits":10}"#).await.unwrap();
        store.set("@me.billing", r#"{"credits":9}"#).await.unwrap();
        assert_eq!(
            store.get("@me.billing").await.unwrap().as_deref(),
            Some(r#"{"credits":9}"#)
        );
        assert_eq!(store.keys().await.unwrap(), vec!["@me.billing".to_string()]);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.set("access_token", "tok").await.unwrap();
        store.remove("access_token").await.unwrap();
        store.remove("access_token").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::open(path).await.unwrap();
            store.set("access_token", "persisted").await.unwrap();
            assert_eq!(store.path(), path);
        }

        let reopened = SqliteStore::open(path).await.unwrap();
        assert_eq!(
            reopened.get("access_token").await.unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[tokio::test]
    async fn from_config_uses_database_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("configured.db");
        let config = StorageConfig {
            database_path: db_path.display().to_string(),
        };
        let store = SqliteStore::from_config(&config).await.unwrap();
        store.set("k", "v").await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        assert_eq!(store.name(), "sqlite");
    }
}
