//! Billing and inventory engine.
//!
//! One `Engine` facade owns the medicine ledger, the committed bills, and
//! the static service catalog. Operations are split across one file per
//! concern: inventory ledger, service catalog, draft line items, invoice
//! totals, bill lifecycle, and derived reports.

mod bills;
mod catalog;
mod draft;
mod inventory;
mod reports;
mod totals;

pub use draft::DraftBill;
pub use reports::BillingStats;
pub use totals::compute_totals;

use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{starter_medicines, Bill, Medicine, PatientLookup, Service};
use crate::store::Store;

/// The billing and inventory engine.
///
/// Single-threaded by design: every operation takes `&mut self` and runs
/// to completion. Mutations persist through the injected [`Store`] after
/// the in-memory state has been updated; a failed save is logged and the
/// in-memory state remains authoritative.
pub struct Engine {
    medicines: Vec<Medicine>,
    bills: Vec<Bill>,
    services: Vec<Service>,
    store: Box<dyn Store>,
    patients: Box<dyn PatientLookup>,
}

impl Engine {
    /// Open the engine against a store, seeding default data for any
    /// entity the store holds no snapshot of.
    pub fn open(
        store: Box<dyn Store>,
        patients: Box<dyn PatientLookup>,
    ) -> EngineResult<Self> {
        let medicines = store.load_medicines()?;
        let bills = store.load_bills()?;

        let mut engine = Self {
            medicines: Vec::new(),
            bills: Vec::new(),
            services: Service::default_catalog(),
            store,
            patients,
        };

        match medicines {
            Some(loaded) => engine.medicines = loaded,
            None => {
                engine.medicines = starter_medicines();
                engine.persist_medicines();
            }
        }
        match bills {
            Some(loaded) => engine.bills = loaded,
            None => engine.persist_bills(),
        }

        info!(
            medicines = engine.medicines.len(),
            bills = engine.bills.len(),
            "engine opened"
        );
        Ok(engine)
    }

    /// Open without seeding default data; for callers that manage their
    /// own collections.
    pub fn with_store_unseeded(
        store: Box<dyn Store>,
        patients: Box<dyn PatientLookup>,
    ) -> EngineResult<Self> {
        let medicines = store.load_medicines()?.unwrap_or_default();
        let bills = store.load_bills()?.unwrap_or_default();

        Ok(Self {
            medicines,
            bills,
            services: Service::default_catalog(),
            store,
            patients,
        })
    }

    /// All medicines in the ledger.
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    /// All committed bills.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Persist the medicine collection, degrading to in-memory state on
    /// failure.
    pub(crate) fn persist_medicines(&mut self) {
        if let Err(e) = self.store.save_medicines(&self.medicines) {
            warn!(error = %e, "failed to persist medicines; continuing with in-memory state");
        }
    }

    /// Persist the bill collection, degrading to in-memory state on failure.
    pub(crate) fn persist_bills(&mut self) {
        if let Err(e) = self.store.save_bills(&self.bills) {
            warn!(error = %e, "failed to persist bills; continuing with in-memory state");
        }
    }
}
