//! Domain models for the billing and inventory engine.

mod bill;
mod medicine;
mod patient;
mod service;

pub use bill::*;
pub use medicine::*;
pub use patient::*;
pub use service::*;
