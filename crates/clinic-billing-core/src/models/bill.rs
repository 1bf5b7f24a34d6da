//! Bill and invoice line-item models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment state of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Pending,
    Paid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Cancelled,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "Pending",
            BillStatus::Paid => "Paid",
            BillStatus::PartiallyPaid => "Partially Paid",
            BillStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Paid" => BillStatus::Paid,
            "Partially Paid" => BillStatus::PartiallyPaid,
            "Cancelled" => BillStatus::Cancelled,
            _ => BillStatus::Pending,
        }
    }

    /// Whether further payments may be recorded against a bill in this state.
    pub fn accepts_payments(&self) -> bool {
        matches!(self, BillStatus::Pending | BillStatus::PartiallyPaid)
    }
}

/// How a bill was (or will be) paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Mobile Payment")]
    MobilePayment,
    Insurance,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::MobilePayment => "Mobile Payment",
            PaymentMethod::Insurance => "Insurance",
        }
    }
}

/// What a line item bills for, with the fields specific to each kind.
///
/// Medicine lines carry the medicine id so reservation reversal can look the
/// ledger entry up by id rather than by display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum LineItemKind {
    Medicine {
        medicine_id: u32,
        generic_name: String,
        batch_number: String,
        expiry_date: NaiveDate,
    },
    Service {
        code: String,
        category: String,
        duration_minutes: u32,
    },
}

/// One priced row within a bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillLineItem {
    #[serde(flatten)]
    pub kind: LineItemKind,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Absolute discount per unit.
    pub discount: Decimal,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// `(unit_price - discount) * quantity`, maintained on every quantity edit.
    pub total: Decimal,
}

impl BillLineItem {
    /// Line total for a given quantity.
    pub fn total_for(unit_price: Decimal, discount: Decimal, quantity: u32) -> Decimal {
        (unit_price - discount) * Decimal::from(quantity)
    }

    /// Tax contribution of this line, computed on the line total.
    pub fn tax_amount(&self) -> Decimal {
        self.total * self.tax_rate / Decimal::ONE_HUNDRED
    }

    pub fn is_medicine(&self) -> bool {
        matches!(self.kind, LineItemKind::Medicine { .. })
    }

    /// Ledger id for medicine lines, `None` for service lines.
    pub fn medicine_id(&self) -> Option<u32> {
        match &self.kind {
            LineItemKind::Medicine { medicine_id, .. } => Some(*medicine_id),
            LineItemKind::Service { .. } => None,
        }
    }
}

/// Bill-level discount as entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DiscountMode {
    /// Percentage of the subtotal, 0..=100.
    Percentage(Decimal),
    /// Fixed absolute amount, bounded by the subtotal.
    Fixed(Decimal),
}

impl Default for DiscountMode {
    fn default() -> Self {
        DiscountMode::Fixed(Decimal::ZERO)
    }
}

/// Aggregated invoice amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A committed invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: u32,
    /// Format `INV-<year>-<seq>`, sequential per existing bill count.
    pub invoice_number: String,
    pub patient_id: u32,
    pub patient_name: String,
    pub items: Vec<BillLineItem>,
    /// Subtotal: sum of line totals.
    pub amount: Decimal,
    /// Absolute bill-level discount.
    pub discount: Decimal,
    /// Sum of per-line tax contributions.
    pub tax: Decimal,
    /// `amount - discount + tax`.
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub status: BillStatus,
    pub paid_amount: Decimal,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: String,
}

impl Bill {
    /// Amount still owed.
    pub fn outstanding(&self) -> Decimal {
        self.total - self.paid_amount
    }
}
