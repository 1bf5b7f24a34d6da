//! Invoice totals calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BillLineItem, BillTotals, DiscountMode};

/// Aggregate line items into invoice totals under an already-resolved
/// absolute discount.
///
/// Tax is computed per line on the line's own total; the bill-level
/// discount does not reduce any line's tax base. This matches the clinic's
/// established billing behavior and is a business rule, not an accident:
/// a bill with subtotal 100.00, discount 10.00, and 17% tax totals 107.00.
pub fn compute_totals(lines: &[BillLineItem], discount: Decimal) -> BillTotals {
    let subtotal: Decimal = lines.iter().map(|l| l.total).sum();
    let tax: Decimal = lines.iter().map(|l| l.tax_amount()).sum();
    BillTotals {
        subtotal,
        discount,
        tax,
        total: subtotal - discount + tax,
    }
}

impl DiscountMode {
    /// Resolve the operator's discount entry to an absolute amount
    /// against the given subtotal.
    pub fn resolve(&self, subtotal: Decimal) -> EngineResult<Decimal> {
        match self {
            DiscountMode::Percentage(p) => {
                if *p < Decimal::ZERO || *p > Decimal::ONE_HUNDRED {
                    return Err(EngineError::Validation(format!(
                        "discount percentage {p} out of range 0..=100"
                    )));
                }
                Ok(subtotal * *p / Decimal::ONE_HUNDRED)
            }
            DiscountMode::Fixed(f) => {
                if *f < Decimal::ZERO || *f > subtotal {
                    return Err(EngineError::Validation(format!(
                        "fixed discount {f} exceeds subtotal {subtotal}"
                    )));
                }
                Ok(*f)
            }
        }
    }
}
