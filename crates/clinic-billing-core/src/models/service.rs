//! Billable medical service catalog models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A billable medical service. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: Decimal,
    /// Appointment duration in minutes.
    pub duration_minutes: u32,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
}

impl Service {
    /// The clinic's default service catalog.
    pub fn default_catalog() -> Vec<Service> {
        vec![
            Service::catalog_entry(1, "Doctor Consultation", "DC001", "Consultation", Decimal::new(15000, 2), 30),
            Service::catalog_entry(2, "Follow-up Consultation", "DC002", "Consultation", Decimal::new(10000, 2), 20),
            Service::catalog_entry(3, "ECG Test", "ECG001", "Diagnostic", Decimal::new(20000, 2), 30),
            Service::catalog_entry(4, "Blood Test", "BT001", "Laboratory", Decimal::new(25000, 2), 15),
            Service::catalog_entry(5, "X-Ray Chest", "XRC001", "Radiology", Decimal::new(35000, 2), 45),
            Service::catalog_entry(6, "Ultrasound", "US001", "Imaging", Decimal::new(50000, 2), 60),
            Service::catalog_entry(7, "Physiotherapy Session", "PT001", "Therapy", Decimal::new(12000, 2), 45),
        ]
    }

    fn catalog_entry(
        id: u32,
        name: &str,
        code: &str,
        category: &str,
        price: Decimal,
        duration_minutes: u32,
    ) -> Service {
        Service {
            id,
            name: name.into(),
            code: code.into(),
            category: category.into(),
            price,
            duration_minutes,
            tax_rate: Decimal::from(17u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = Service::default_catalog();
        assert_eq!(catalog.len(), 7);

        // Ids are 1..=7 in order
        for (i, service) in catalog.iter().enumerate() {
            assert_eq!(service.id as usize, i + 1);
            assert_eq!(service.tax_rate, Decimal::from(17u32));
        }
    }

    #[test]
    fn test_catalog_prices() {
        let catalog = Service::default_catalog();
        assert_eq!(catalog[0].code, "DC001");
        assert_eq!(catalog[0].price, Decimal::new(15000, 2));
        assert_eq!(catalog[5].name, "Ultrasound");
        assert_eq!(catalog[5].duration_minutes, 60);
    }
}
