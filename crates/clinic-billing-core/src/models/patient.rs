//! Patient display records and the lookup port.

use serde::{Deserialize, Serialize};

/// Patient display fields used for invoice headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub cnic: String,
    pub phone: String,
    pub age: u32,
    pub gender: String,
}

/// Placeholder shown when the lookup has no record for a bill's patient.
pub const UNKNOWN_PATIENT: &str = "Patient information not available";

/// Read-only collaborator that resolves a patient by id.
pub trait PatientLookup {
    fn patient_by_id(&self, id: u32) -> Option<Patient>;
}

/// A `Vec`-backed lookup for embedding applications and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPatients {
    patients: Vec<Patient>,
}

impl StaticPatients {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self { patients }
    }

    /// A lookup that resolves nobody.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl PatientLookup for StaticPatients {
    fn patient_by_id(&self, id: u32) -> Option<Patient> {
        self.patients.iter().find(|p| p.id == id).cloned()
    }
}
