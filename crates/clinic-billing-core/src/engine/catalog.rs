//! Service catalog queries.

use super::Engine;
use crate::models::Service;

impl Engine {
    /// The full service catalog, in definition order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Look up a service by id.
    pub fn get_service(&self, id: u32) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Case-insensitive substring search over service name and code.
    pub fn search_services(&self, query: &str) -> Vec<&Service> {
        let needle = query.to_lowercase();
        self.services
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.code.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StaticPatients;
    use crate::store::MemoryStore;

    fn setup_engine() -> Engine {
        Engine::open(
            Box::new(MemoryStore::new()),
            Box::new(StaticPatients::empty()),
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_loaded_at_startup() {
        let engine = setup_engine();
        assert_eq!(engine.services().len(), 7);
        assert_eq!(engine.get_service(3).unwrap().name, "ECG Test");
        assert!(engine.get_service(99).is_none());
    }

    #[test]
    fn test_search_by_name_and_code() {
        let engine = setup_engine();

        let by_name = engine.search_services("consult");
        assert_eq!(by_name.len(), 2);

        let by_code = engine.search_services("ecg001");
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "ECG Test");
    }
}
