//! Bill lifecycle operations.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{compute_totals, DraftBill, Engine};
use crate::error::{EngineError, EngineResult};
use crate::models::{Bill, BillStatus, PaymentMethod, UNKNOWN_PATIENT};

/// Days until a bill falls due.
const DUE_DAYS: i64 = 30;

impl Engine {
    /// Commit a draft as a bill.
    ///
    /// The draft's stock reservations become final; its line items, totals,
    /// and header fields are persisted under a fresh id and invoice number.
    /// The `date` parameter drives the invoice-number year and the due date.
    pub fn create_bill(&mut self, draft: DraftBill, date: NaiveDate) -> EngineResult<Bill> {
        let patient_id = draft
            .patient_id
            .ok_or_else(|| EngineError::Validation("no patient selected".into()))?;
        if draft.items.is_empty() {
            return Err(EngineError::Validation("bill has no line items".into()));
        }

        let subtotal: Decimal = draft.items.iter().map(|l| l.total).sum();
        let discount = draft.discount_mode.resolve(subtotal)?;
        let totals = compute_totals(&draft.items, discount);

        let id = self.bills.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let invoice_number = format!("INV-{}-{:03}", date.year(), self.bills.len() + 1);
        let patient_name = self
            .patients
            .patient_by_id(patient_id)
            .map(|p| p.name)
            .unwrap_or_else(|| UNKNOWN_PATIENT.into());

        let bill = Bill {
            id,
            invoice_number,
            patient_id,
            patient_name,
            items: draft.items,
            amount: totals.subtotal,
            discount: totals.discount,
            tax: totals.tax,
            total: totals.total,
            payment_method: draft.payment_method,
            status: draft.initial_status,
            paid_amount: Decimal::ZERO,
            date,
            due_date: date + Duration::days(DUE_DAYS),
            notes: draft.notes,
        };

        self.bills.push(bill.clone());
        self.persist_bills();

        info!(
            bill_id = bill.id,
            invoice = %bill.invoice_number,
            total = %bill.total,
            "bill created"
        );
        Ok(bill)
    }

    /// Record a payment against a bill, deriving the status from the
    /// cumulative paid amount.
    pub fn record_payment(
        &mut self,
        bill_id: u32,
        amount: Decimal,
        method: PaymentMethod,
    ) -> EngineResult<Bill> {
        let bill = self
            .bills
            .iter_mut()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| EngineError::NotFound(format!("bill {bill_id}")))?;

        if !bill.status.accepts_payments() {
            return Err(EngineError::InvalidPayment(format!(
                "bill {} is {}",
                bill.invoice_number,
                bill.status.as_str()
            )));
        }
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidPayment(
                "payment amount must be positive".into(),
            ));
        }
        let outstanding = bill.outstanding();
        if amount > outstanding {
            return Err(EngineError::InvalidPayment(format!(
                "payment {amount} exceeds outstanding balance {outstanding}"
            )));
        }

        bill.paid_amount += amount;
        bill.status = if bill.paid_amount >= bill.total {
            BillStatus::Paid
        } else {
            BillStatus::PartiallyPaid
        };
        bill.payment_method = method;
        let updated = bill.clone();
        self.persist_bills();

        info!(
            bill_id,
            amount = %amount,
            method = method.as_str(),
            status = updated.status.as_str(),
            "payment recorded"
        );
        Ok(updated)
    }

    /// Quick-settle: override a bill's status directly without touching
    /// `paid_amount`. Distinct from [`Engine::record_payment`] by design;
    /// the two paths serve different counter workflows and their semantics
    /// must not be merged silently.
    pub fn update_status(&mut self, bill_id: u32, status: BillStatus) -> EngineResult<Bill> {
        let bill = self
            .bills
            .iter_mut()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| EngineError::NotFound(format!("bill {bill_id}")))?;

        bill.status = status;
        let updated = bill.clone();

        if status == BillStatus::Paid && updated.paid_amount < updated.total {
            warn!(
                bill_id,
                paid = %updated.paid_amount,
                total = %updated.total,
                "quick-settle marked bill Paid with unreconciled paid amount"
            );
        }
        self.persist_bills();
        Ok(updated)
    }

    /// Delete a bill. Medicine stock dispensed under the bill is NOT
    /// restored; deleted bills represent completed dispensing. Operators
    /// needing the reversal can compensate via `adjust_stock` with a
    /// `Return` reason.
    pub fn delete_bill(&mut self, bill_id: u32) -> EngineResult<()> {
        let index = self
            .bills
            .iter()
            .position(|b| b.id == bill_id)
            .ok_or_else(|| EngineError::NotFound(format!("bill {bill_id}")))?;

        self.bills.remove(index);
        self.persist_bills();
        Ok(())
    }

    /// Look up a bill by id.
    pub fn get_bill(&self, id: u32) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    /// Case-insensitive substring search over invoice number and patient
    /// name.
    pub fn search_bills(&self, query: &str) -> Vec<&Bill> {
        let needle = query.to_lowercase();
        self.bills
            .iter()
            .filter(|b| {
                b.invoice_number.to_lowercase().contains(&needle)
                    || b.patient_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Bills currently in the given status.
    pub fn bills_by_status(&self, status: BillStatus) -> Vec<&Bill> {
        self.bills.iter().filter(|b| b.status == status).collect()
    }
}
