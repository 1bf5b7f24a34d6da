//! Inventory ledger operations.

use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

use super::Engine;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    predefined_medicines, AdjustmentReason, Medicine, NewMedicine, StockStatus,
};

/// Window for the expiring-soon query, in days.
const EXPIRY_WINDOW_DAYS: i64 = 90;

impl Engine {
    /// Add a medicine to the ledger, assigning the next id and deriving
    /// the stock status.
    pub fn add_medicine(&mut self, record: NewMedicine) -> EngineResult<Medicine> {
        validate_medicine(&record.name, record.unit_price, record.retail_price)?;

        let id = self.medicines.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let medicine = record.into_medicine(id);
        self.medicines.push(medicine.clone());
        self.persist_medicines();

        info!(medicine_id = id, name = %medicine.name, "medicine added");
        Ok(medicine)
    }

    /// Replace a stored medicine by id, re-deriving its stock status from
    /// the submitted quantity.
    pub fn update_medicine(&mut self, mut record: Medicine) -> EngineResult<Medicine> {
        validate_medicine(&record.name, record.unit_price, record.retail_price)?;

        let slot = self
            .medicines
            .iter_mut()
            .find(|m| m.id == record.id)
            .ok_or_else(|| EngineError::NotFound(format!("medicine {}", record.id)))?;

        record.stock_status = StockStatus::derive(record.quantity, record.min_stock);
        *slot = record.clone();
        self.persist_medicines();
        Ok(record)
    }

    /// Apply a signed stock adjustment with an operator-supplied reason.
    pub fn adjust_stock(
        &mut self,
        id: u32,
        delta: i64,
        reason: AdjustmentReason,
    ) -> EngineResult<Medicine> {
        if delta == 0 {
            return Err(EngineError::InvalidAdjustment(
                "adjustment quantity must be non-zero".into(),
            ));
        }

        let medicine = self
            .medicines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("medicine {id}")))?;

        let adjusted = medicine.quantity as i64 + delta;
        if adjusted < 0 {
            return Err(EngineError::InvalidAdjustment(format!(
                "removing {} from {} would leave {} units of {}",
                -delta, medicine.quantity, adjusted, medicine.name
            )));
        }

        medicine.quantity = adjusted as u32;
        medicine.stock_status = StockStatus::derive(medicine.quantity, medicine.min_stock);
        let updated = medicine.clone();
        self.persist_medicines();

        info!(
            medicine_id = id,
            delta,
            reason = reason.as_str(),
            quantity = updated.quantity,
            "stock adjusted"
        );
        Ok(updated)
    }

    /// Remove a medicine from the ledger. Confirmation is the caller's
    /// concern; this delete is unconditional.
    pub fn delete_medicine(&mut self, id: u32) -> EngineResult<()> {
        let index = self
            .medicines
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("medicine {id}")))?;

        self.medicines.remove(index);
        self.persist_medicines();
        Ok(())
    }

    /// Stock a medicine from the predefined list with default commercial
    /// fields: two-year expiry, 100 units, and a generated batch number.
    pub fn quick_add_medicine(&mut self, index: usize, today: NaiveDate) -> EngineResult<Medicine> {
        let entry = predefined_medicines()
            .get(index)
            .ok_or_else(|| EngineError::NotFound(format!("predefined medicine {index}")))?;

        let batch = format!(
            "BATCH-{}-{:03}",
            today.year(),
            rand::thread_rng().gen_range(0..1000)
        );

        self.add_medicine(NewMedicine {
            name: entry.name.into(),
            generic_name: entry.generic_name.into(),
            category: entry.category.into(),
            manufacturer: "Generic Manufacturer".into(),
            batch_number: batch,
            expiry_date: today + Months::new(24),
            unit_price: Decimal::new(250, 2),
            retail_price: Decimal::new(450, 2),
            discount: Decimal::ZERO,
            tax_rate: Decimal::from(17u32),
            quantity: 100,
            min_stock: 20,
        })
    }

    /// Look up a medicine by ledger id.
    pub fn get_medicine(&self, id: u32) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// Medicines expiring within the next 90 days (and not yet expired).
    pub fn expiring_soon(&self, today: NaiveDate) -> Vec<&Medicine> {
        self.medicines
            .iter()
            .filter(|m| {
                let days = (m.expiry_date - today).num_days();
                (0..=EXPIRY_WINDOW_DAYS).contains(&days)
            })
            .collect()
    }

    /// Medicines at or below their minimum stock, but not out of stock.
    pub fn low_stock(&self) -> Vec<&Medicine> {
        self.medicines
            .iter()
            .filter(|m| m.quantity > 0 && m.quantity <= m.min_stock)
            .collect()
    }

    /// Medicines with zero stock.
    pub fn out_of_stock(&self) -> Vec<&Medicine> {
        self.medicines.iter().filter(|m| m.quantity == 0).collect()
    }

    /// Case-insensitive substring search over name, generic name, and
    /// batch number.
    pub fn search_medicines(&self, query: &str) -> Vec<&Medicine> {
        let needle = query.to_lowercase();
        self.medicines
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.generic_name.to_lowercase().contains(&needle)
                    || m.batch_number.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn validate_medicine(name: &str, unit_price: Decimal, retail_price: Decimal) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::Validation("medicine name is required".into()));
    }
    if retail_price <= unit_price {
        return Err(EngineError::Validation(
            "retail price must be greater than unit price".into(),
        ));
    }
    Ok(())
}
