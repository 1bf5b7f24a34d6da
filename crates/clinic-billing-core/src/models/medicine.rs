//! Medicine inventory models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived stock level for a medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    /// Derive status from quantity against the minimum-stock threshold.
    ///
    /// Pure function: the engine re-applies it on every quantity mutation so
    /// the stored status can never drift from the quantity.
    pub fn derive(quantity: u32, min_stock: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Low Stock" => StockStatus::LowStock,
            "Out of Stock" => StockStatus::OutOfStock,
            _ => StockStatus::InStock,
        }
    }
}

/// Operator-supplied reason for a manual stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentReason {
    Purchase,
    Return,
    Sale,
    Damage,
    Expired,
    Adjustment,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Purchase => "Purchase",
            AdjustmentReason::Return => "Return",
            AdjustmentReason::Sale => "Sale",
            AdjustmentReason::Damage => "Damage",
            AdjustmentReason::Expired => "Expired",
            AdjustmentReason::Adjustment => "Adjustment",
        }
    }
}

/// A stocked medicine in the inventory ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: u32,
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    /// Cost price per unit.
    pub unit_price: Decimal,
    /// Sale price per unit.
    pub retail_price: Decimal,
    /// Absolute discount per unit.
    pub discount: Decimal,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    pub quantity: u32,
    pub min_stock: u32,
    pub stock_status: StockStatus,
}

/// Input for creating a medicine; the ledger assigns the id and derives
/// the stock status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub unit_price: Decimal,
    pub retail_price: Decimal,
    pub discount: Decimal,
    pub tax_rate: Decimal,
    pub quantity: u32,
    pub min_stock: u32,
}

impl NewMedicine {
    /// Materialize with an assigned id and derived stock status.
    pub fn into_medicine(self, id: u32) -> Medicine {
        let stock_status = StockStatus::derive(self.quantity, self.min_stock);
        Medicine {
            id,
            name: self.name,
            generic_name: self.generic_name,
            category: self.category,
            manufacturer: self.manufacturer,
            batch_number: self.batch_number,
            expiry_date: self.expiry_date,
            unit_price: self.unit_price,
            retail_price: self.retail_price,
            discount: self.discount,
            tax_rate: self.tax_rate,
            quantity: self.quantity,
            min_stock: self.min_stock,
            stock_status,
        }
    }
}

/// A (name, generic name, category) entry in the predefined quick-add list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredefinedMedicine {
    pub name: &'static str,
    pub generic_name: &'static str,
    pub category: &'static str,
}

/// Predefined medicines available for one-click stocking.
pub fn predefined_medicines() -> &'static [PredefinedMedicine] {
    const LIST: &[PredefinedMedicine] = &[
        PredefinedMedicine { name: "Lisinopril 10mg", generic_name: "Lisinopril", category: "Cardiovascular" },
        PredefinedMedicine { name: "Metformin 500mg", generic_name: "Metformin", category: "Diabetes" },
        PredefinedMedicine { name: "Amlodipine 5mg", generic_name: "Amlodipine", category: "Cardiovascular" },
        PredefinedMedicine { name: "Atorvastatin 20mg", generic_name: "Atorvastatin", category: "Cardiovascular" },
        PredefinedMedicine { name: "Levothyroxine 50mcg", generic_name: "Levothyroxine", category: "Hormonal" },
        PredefinedMedicine { name: "Omeprazole 20mg", generic_name: "Omeprazole", category: "Gastrointestinal" },
        PredefinedMedicine { name: "Amoxicillin 500mg", generic_name: "Amoxicillin", category: "Antibiotics" },
        PredefinedMedicine { name: "Ibuprofen 400mg", generic_name: "Ibuprofen", category: "Pain Relief" },
        PredefinedMedicine { name: "Cetirizine 10mg", generic_name: "Cetirizine", category: "Antihistamine" },
        PredefinedMedicine { name: "Metronidazole 400mg", generic_name: "Metronidazole", category: "Antibiotics" },
        PredefinedMedicine { name: "Salbutamol Inhaler", generic_name: "Salbutamol", category: "Respiratory" },
        PredefinedMedicine { name: "Losartan 50mg", generic_name: "Losartan", category: "Cardiovascular" },
        PredefinedMedicine { name: "Gliclazide 80mg", generic_name: "Gliclazide", category: "Diabetes" },
        PredefinedMedicine { name: "Diclofenac 50mg", generic_name: "Diclofenac", category: "Pain Relief" },
        PredefinedMedicine { name: "Paracetamol 500mg", generic_name: "Paracetamol", category: "Pain Relief" },
    ];
    LIST
}

/// Default inventory seeded when the store holds no medicine snapshot.
pub fn starter_medicines() -> Vec<Medicine> {
    vec![
        starter(1, "Lisinopril 10mg", "Lisinopril", "Hypertension", "PharmaCorp",
                "LIS-2023-001", ymd(2025, 6, 30), 150, Decimal::new(550, 2), Decimal::new(800, 2), 20),
        starter(2, "Metformin 500mg", "Metformin", "Diabetes", "MediHealth",
                "MET-2023-002", ymd(2024, 12, 31), 200, Decimal::new(320, 2), Decimal::new(550, 2), 25),
        starter(3, "Ibuprofen 400mg", "Ibuprofen", "Pain Relief", "PainFree Inc",
                "IBU-2023-003", ymd(2024, 9, 30), 300, Decimal::new(180, 2), Decimal::new(300, 2), 50),
        starter(4, "Amoxicillin 500mg", "Amoxicillin", "Antibiotic", "AntibioPharm",
                "AMX-2023-004", ymd(2024, 8, 31), 120, Decimal::new(480, 2), Decimal::new(750, 2), 15),
        starter(5, "Atorvastatin 20mg", "Atorvastatin", "Cholesterol", "CholestoMed",
                "ATO-2023-005", ymd(2025, 3, 31), 180, Decimal::new(650, 2), Decimal::new(1000, 2), 20),
    ]
}

#[allow(clippy::too_many_arguments)]
fn starter(
    id: u32,
    name: &str,
    generic_name: &str,
    category: &str,
    manufacturer: &str,
    batch_number: &str,
    expiry_date: NaiveDate,
    quantity: u32,
    unit_price: Decimal,
    retail_price: Decimal,
    min_stock: u32,
) -> Medicine {
    Medicine {
        id,
        name: name.into(),
        generic_name: generic_name.into(),
        category: category.into(),
        manufacturer: manufacturer.into(),
        batch_number: batch_number.into(),
        expiry_date,
        unit_price,
        retail_price,
        discount: Decimal::ZERO,
        tax_rate: Decimal::from(17u32),
        quantity,
        min_stock,
        stock_status: StockStatus::derive(quantity, min_stock),
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid literal date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_boundaries() {
        assert_eq!(StockStatus::derive(0, 20), StockStatus::OutOfStock);
        assert_eq!(StockStatus::derive(1, 20), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(20, 20), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(21, 20), StockStatus::InStock);
    }

    #[test]
    fn test_stock_status_round_trip_strings() {
        for status in [
            StockStatus::InStock,
            StockStatus::LowStock,
            StockStatus::OutOfStock,
        ] {
            assert_eq!(StockStatus::from_string(status.as_str()), status);
        }
    }

    #[test]
    fn test_starter_medicines_all_in_stock() {
        let seed = starter_medicines();
        assert_eq!(seed.len(), 5);
        for m in &seed {
            assert_eq!(m.stock_status, StockStatus::InStock);
            assert!(m.retail_price > m.unit_price);
        }
    }

    #[test]
    fn test_predefined_list_size() {
        assert_eq!(predefined_medicines().len(), 15);
    }

    #[test]
    fn test_into_medicine_derives_status() {
        let new = NewMedicine {
            name: "Test 10mg".into(),
            generic_name: "Test".into(),
            category: "Test".into(),
            manufacturer: "TestCo".into(),
            batch_number: "T-001".into(),
            expiry_date: ymd(2026, 1, 1),
            unit_price: Decimal::new(100, 2),
            retail_price: Decimal::new(200, 2),
            discount: Decimal::ZERO,
            tax_rate: Decimal::from(17u32),
            quantity: 5,
            min_stock: 10,
        };
        let medicine = new.into_medicine(7);
        assert_eq!(medicine.id, 7);
        assert_eq!(medicine.stock_status, StockStatus::LowStock);
    }
}
