//! In-memory store (for testing and ephemeral sessions).

use super::{Store, StoreResult};
use crate::models::{Bill, Medicine};

/// A store backed by plain vectors. Starts empty, so a fresh instance
/// triggers default-data seeding in the engine.
#[derive(Debug, Default)]
pub struct MemoryStore {
    medicines: Option<Vec<Medicine>>,
    bills: Option<Vec<Bill>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_medicines(&self) -> StoreResult<Option<Vec<Medicine>>> {
        Ok(self.medicines.clone())
    }

    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()> {
        self.medicines = Some(medicines.to_vec());
        Ok(())
    }

    fn load_bills(&self) -> StoreResult<Option<Vec<Bill>>> {
        Ok(self.bills.clone())
    }

    fn save_bills(&mut self, bills: &[Bill]) -> StoreResult<()> {
        self.bills = Some(bills.to_vec());
        Ok(())
    }
}
