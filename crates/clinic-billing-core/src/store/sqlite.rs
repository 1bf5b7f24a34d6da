//! SQLite-backed snapshot store.
//!
//! One row per entity type in a `snapshots` table, with the collection
//! JSON-encoded in the payload column. The entity keys mirror the
//! browser-storage keys the clinic app used.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{Store, StoreResult};
use crate::models::{Bill, Medicine};

const MEDICINES_KEY: &str = "clinic-medicines";
const BILLS_KEY: &str = "clinic-bills";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS snapshots (
    entity TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Snapshot store over a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open store at path, creating the database if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn load_snapshot<T: serde::de::DeserializeOwned>(
        &self,
        entity: &str,
    ) -> StoreResult<Option<T>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE entity = ?",
                [entity],
                |row| row.get(0),
            )
            .optional()?;

        payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .map_err(Into::into)
    }

    fn save_snapshot<T: serde::Serialize>(&mut self, entity: &str, value: &T) -> StoreResult<()> {
        let payload = serde_json::to_string(value)?;
        self.conn.execute(
            r#"
            INSERT INTO snapshots (entity, payload, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(entity) DO UPDATE SET
                payload = excluded.payload,
                updated_at = datetime('now')
            "#,
            params![entity, payload],
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn load_medicines(&self) -> StoreResult<Option<Vec<Medicine>>> {
        self.load_snapshot(MEDICINES_KEY)
    }

    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()> {
        self.save_snapshot(MEDICINES_KEY, &medicines)
    }

    fn load_bills(&self) -> StoreResult<Option<Vec<Bill>>> {
        self.load_snapshot(BILLS_KEY)
    }

    fn save_bills(&mut self, bills: &[Bill]) -> StoreResult<()> {
        self.save_snapshot(BILLS_KEY, &bills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::starter_medicines;

    #[test]
    fn test_open_in_memory() {
        let store = SqliteStore::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_empty_store_holds_no_snapshot() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load_medicines().unwrap().is_none());
        assert!(store.load_bills().unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload_medicines() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let medicines = starter_medicines();

        store.save_medicines(&medicines).unwrap();
        let loaded = store.load_medicines().unwrap().unwrap();
        assert_eq!(loaded, medicines);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut medicines = starter_medicines();

        store.save_medicines(&medicines).unwrap();
        medicines.truncate(2);
        store.save_medicines(&medicines).unwrap();

        let loaded = store.load_medicines().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
