//! Draft bills and line-item operations.
//!
//! Stock is reserved optimistically: adding a medicine line decrements the
//! ledger immediately, so the draft and the ledger stay mutually consistent
//! without a separate pending pool. Every ledger mutation a draft performs
//! is appended to its undo log, so an abandoned draft can be rolled back
//! atomically by [`Engine::discard_draft`] no matter which exit path the
//! operator took.

use tracing::{info, warn};
use uuid::Uuid;

use super::Engine;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BillLineItem, BillStatus, DiscountMode, LineItemKind, PaymentMethod, StockStatus,
};

/// One ledger mutation performed on behalf of a draft. `delta` is the
/// signed change applied to the medicine's quantity.
#[derive(Debug, Clone, Copy)]
pub(super) struct StockMutation {
    pub(super) medicine_id: u32,
    pub(super) delta: i64,
}

/// An in-progress, uncommitted invoice.
///
/// Consumed by value on commit ([`Engine::create_bill`]) or discard
/// ([`Engine::discard_draft`]); a draft cannot outlive either.
#[derive(Debug)]
pub struct DraftBill {
    /// Correlation id for log events only.
    pub draft_id: Uuid,
    pub patient_id: Option<u32>,
    pub items: Vec<BillLineItem>,
    pub discount_mode: DiscountMode,
    pub payment_method: PaymentMethod,
    pub initial_status: BillStatus,
    pub notes: String,
    pub(super) undo_log: Vec<StockMutation>,
}

impl DraftBill {
    pub fn new() -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            patient_id: None,
            items: Vec::new(),
            discount_mode: DiscountMode::default(),
            payment_method: PaymentMethod::default(),
            initial_status: BillStatus::Pending,
            notes: String::new(),
            undo_log: Vec::new(),
        }
    }

    pub fn for_patient(patient_id: u32) -> Self {
        let mut draft = Self::new();
        draft.patient_id = Some(patient_id);
        draft
    }

    /// Net quantity this draft currently holds reserved for a medicine.
    pub fn reserved_quantity(&self, medicine_id: u32) -> u32 {
        let net: i64 = self
            .undo_log
            .iter()
            .filter(|m| m.medicine_id == medicine_id)
            .map(|m| -m.delta)
            .sum();
        net.max(0) as u32
    }
}

impl Default for DraftBill {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Add a medicine line to a draft, reserving stock from the ledger.
    ///
    /// The stock check is against live ledger quantity; earlier adds have
    /// already decremented it, so subsequent adds see reduced stock.
    pub fn add_medicine_line(
        &mut self,
        draft: &mut DraftBill,
        medicine_id: u32,
        quantity: u32,
    ) -> EngineResult<()> {
        if quantity == 0 {
            return Err(EngineError::Validation(
                "line quantity must be at least 1".into(),
            ));
        }

        let medicine = self
            .medicines
            .iter_mut()
            .find(|m| m.id == medicine_id)
            .ok_or_else(|| EngineError::NotFound(format!("medicine {medicine_id}")))?;

        if quantity > medicine.quantity {
            return Err(EngineError::InsufficientStock {
                name: medicine.name.clone(),
                requested: quantity,
                available: medicine.quantity,
            });
        }

        medicine.quantity -= quantity;
        medicine.stock_status = StockStatus::derive(medicine.quantity, medicine.min_stock);

        draft.items.push(BillLineItem {
            kind: LineItemKind::Medicine {
                medicine_id,
                generic_name: medicine.generic_name.clone(),
                batch_number: medicine.batch_number.clone(),
                expiry_date: medicine.expiry_date,
            },
            name: medicine.name.clone(),
            quantity,
            unit_price: medicine.retail_price,
            discount: medicine.discount,
            tax_rate: medicine.tax_rate,
            total: BillLineItem::total_for(medicine.retail_price, medicine.discount, quantity),
        });
        draft.undo_log.push(StockMutation {
            medicine_id,
            delta: -(quantity as i64),
        });
        self.persist_medicines();
        Ok(())
    }

    /// Add a service line to a draft. Services are not stock-limited;
    /// the line starts at quantity 1.
    pub fn add_service_line(&mut self, draft: &mut DraftBill, service_id: u32) -> EngineResult<()> {
        let service = self
            .get_service(service_id)
            .ok_or_else(|| EngineError::NotFound(format!("service {service_id}")))?;

        draft.items.push(BillLineItem {
            kind: LineItemKind::Service {
                code: service.code.clone(),
                category: service.category.clone(),
                duration_minutes: service.duration_minutes,
            },
            name: service.name.clone(),
            quantity: 1,
            unit_price: service.price,
            discount: rust_decimal::Decimal::ZERO,
            tax_rate: service.tax_rate,
            total: service.price,
        });
        Ok(())
    }

    /// Remove a line from a draft, releasing any reserved stock back to
    /// the ledger (looked up by medicine id).
    pub fn remove_line(&mut self, draft: &mut DraftBill, index: usize) -> EngineResult<()> {
        if index >= draft.items.len() {
            return Err(EngineError::NotFound(format!("line item {index}")));
        }
        let line = draft.items.remove(index);

        if let Some(medicine_id) = line.medicine_id() {
            match self.medicines.iter_mut().find(|m| m.id == medicine_id) {
                Some(medicine) => {
                    medicine.quantity += line.quantity;
                    medicine.stock_status =
                        StockStatus::derive(medicine.quantity, medicine.min_stock);
                    draft.undo_log.push(StockMutation {
                        medicine_id,
                        delta: line.quantity as i64,
                    });
                    self.persist_medicines();
                }
                None => {
                    warn!(
                        medicine_id,
                        draft_id = %draft.draft_id,
                        "medicine deleted while reserved by a draft; nothing to restore"
                    );
                }
            }
        }
        Ok(())
    }

    /// Change a line's quantity, adjusting the ledger reservation for
    /// medicine lines and recomputing the line total.
    pub fn update_line_quantity(
        &mut self,
        draft: &mut DraftBill,
        index: usize,
        new_quantity: u32,
    ) -> EngineResult<()> {
        if new_quantity == 0 {
            return Err(EngineError::Validation(
                "line quantity must be at least 1".into(),
            ));
        }
        let line = draft
            .items
            .get_mut(index)
            .ok_or_else(|| EngineError::NotFound(format!("line item {index}")))?;

        if let Some(medicine_id) = line.medicine_id() {
            let delta = new_quantity as i64 - line.quantity as i64;
            if delta != 0 {
                let medicine = self
                    .medicines
                    .iter_mut()
                    .find(|m| m.id == medicine_id)
                    .ok_or_else(|| EngineError::NotFound(format!("medicine {medicine_id}")))?;

                if delta > 0 && delta as u32 > medicine.quantity {
                    return Err(EngineError::InsufficientStock {
                        name: medicine.name.clone(),
                        requested: delta as u32,
                        available: medicine.quantity,
                    });
                }

                // delta > 0 takes more stock; delta < 0 releases some
                medicine.quantity = (medicine.quantity as i64 - delta) as u32;
                medicine.stock_status = StockStatus::derive(medicine.quantity, medicine.min_stock);
                draft.undo_log.push(StockMutation {
                    medicine_id,
                    delta: -delta,
                });
                self.persist_medicines();
            }
        }

        let line = &mut draft.items[index];
        line.quantity = new_quantity;
        line.total = BillLineItem::total_for(line.unit_price, line.discount, new_quantity);
        Ok(())
    }

    /// Discard a draft, replaying its undo log in reverse so every
    /// outstanding reservation returns to the ledger.
    ///
    /// Call this from every exit path that abandons a draft; relying on
    /// the operator to remove each line first leaks reservations.
    pub fn discard_draft(&mut self, draft: DraftBill) -> EngineResult<()> {
        let DraftBill {
            draft_id, undo_log, ..
        } = draft;

        let mut touched = false;
        for mutation in undo_log.iter().rev() {
            match self
                .medicines
                .iter_mut()
                .find(|m| m.id == mutation.medicine_id)
            {
                Some(medicine) => {
                    let restored = medicine.quantity as i64 - mutation.delta;
                    if restored < 0 {
                        warn!(
                            medicine_id = mutation.medicine_id,
                            "rollback would drive stock negative; clamping to zero"
                        );
                    }
                    medicine.quantity = restored.max(0) as u32;
                    medicine.stock_status =
                        StockStatus::derive(medicine.quantity, medicine.min_stock);
                    touched = true;
                }
                None => {
                    warn!(
                        medicine_id = mutation.medicine_id,
                        draft_id = %draft_id,
                        "medicine deleted while reserved by a draft; skipping rollback entry"
                    );
                }
            }
        }

        if touched {
            self.persist_medicines();
        }
        info!(draft_id = %draft_id, "draft discarded; reservations rolled back");
        Ok(())
    }
}
