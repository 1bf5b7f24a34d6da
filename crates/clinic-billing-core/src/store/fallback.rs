//! Primary-plus-cache store composition.

use tracing::warn;

use super::{Store, StoreResult};
use crate::models::{Bill, Medicine};

/// Composes a primary store with a local cache, trading durability for
/// availability: loads prefer the primary and fall back to the cache;
/// saves always reach the cache and reach the primary best-effort.
pub struct FallbackStore<P: Store, C: Store> {
    primary: P,
    cache: C,
}

impl<P: Store, C: Store> FallbackStore<P, C> {
    pub fn new(primary: P, cache: C) -> Self {
        Self { primary, cache }
    }

    fn load_preferring_primary<T>(
        primary: StoreResult<Option<T>>,
        cache: impl FnOnce() -> StoreResult<Option<T>>,
        entity: &str,
    ) -> StoreResult<Option<T>> {
        match primary {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => cache(),
            Err(e) => {
                warn!(entity, error = %e, "primary store load failed; using cached copy");
                cache()
            }
        }
    }
}

impl<P: Store, C: Store> Store for FallbackStore<P, C> {
    fn load_medicines(&self) -> StoreResult<Option<Vec<Medicine>>> {
        Self::load_preferring_primary(
            self.primary.load_medicines(),
            || self.cache.load_medicines(),
            "medicines",
        )
    }

    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()> {
        if let Err(e) = self.primary.save_medicines(medicines) {
            warn!(entity = "medicines", error = %e, "primary store save failed; cache remains authoritative");
        }
        self.cache.save_medicines(medicines)
    }

    fn load_bills(&self) -> StoreResult<Option<Vec<Bill>>> {
        Self::load_preferring_primary(
            self.primary.load_bills(),
            || self.cache.load_bills(),
            "bills",
        )
    }

    fn save_bills(&mut self, bills: &[Bill]) -> StoreResult<()> {
        if let Err(e) = self.primary.save_bills(bills) {
            warn!(entity = "bills", error = %e, "primary store save failed; cache remains authoritative");
        }
        self.cache.save_bills(bills)
    }
}
