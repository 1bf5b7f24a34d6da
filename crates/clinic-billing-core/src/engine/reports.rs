//! Derived aggregate queries for the reports collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Engine;
use crate::models::{BillStatus, StockStatus};

/// Read-only aggregates over the bill and medicine collections. Computed
/// on demand; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingStats {
    /// Sum of totals over Paid bills.
    pub total_revenue: Decimal,
    /// Sum of totals over Pending bills.
    pub pending_amount: Decimal,
    /// Sum of totals over Partially Paid bills.
    pub partially_paid: Decimal,
    pub total_bills: usize,
    pub total_medicines: usize,
    pub low_stock_medicines: usize,
    pub out_of_stock_medicines: usize,
    /// Sum of `quantity * retail_price` over all medicines.
    pub stock_value: Decimal,
}

impl Engine {
    /// Compute the current billing and inventory aggregates.
    pub fn billing_stats(&self) -> BillingStats {
        let sum_by_status = |status: BillStatus| -> Decimal {
            self.bills
                .iter()
                .filter(|b| b.status == status)
                .map(|b| b.total)
                .sum()
        };

        BillingStats {
            total_revenue: sum_by_status(BillStatus::Paid),
            pending_amount: sum_by_status(BillStatus::Pending),
            partially_paid: sum_by_status(BillStatus::PartiallyPaid),
            total_bills: self.bills.len(),
            total_medicines: self.medicines.len(),
            low_stock_medicines: self
                .medicines
                .iter()
                .filter(|m| m.stock_status == StockStatus::LowStock)
                .count(),
            out_of_stock_medicines: self
                .medicines
                .iter()
                .filter(|m| m.stock_status == StockStatus::OutOfStock)
                .count(),
            stock_value: self
                .medicines
                .iter()
                .map(|m| Decimal::from(m.quantity) * m.retail_price)
                .sum(),
        }
    }
}
