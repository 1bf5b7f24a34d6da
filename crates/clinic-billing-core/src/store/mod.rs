//! Persistence collaborator port.
//!
//! The engine reads and writes the medicine and bill collections as
//! whole-collection snapshots keyed by entity type. No partial-update
//! protocol: the engine computes the full collection and asks the
//! collaborator to replace it.

mod fallback;
mod memory;
mod sqlite;

pub use fallback::FallbackStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::models::{Bill, Medicine};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-collection snapshot persistence, keyed by entity type.
///
/// `Ok(None)` from a load means the collaborator holds no snapshot yet;
/// the engine responds by seeding default data.
pub trait Store {
    fn load_medicines(&self) -> StoreResult<Option<Vec<Medicine>>>;
    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()>;
    fn load_bills(&self) -> StoreResult<Option<Vec<Bill>>>;
    fn save_bills(&mut self, bills: &[Bill]) -> StoreResult<()>;
}
