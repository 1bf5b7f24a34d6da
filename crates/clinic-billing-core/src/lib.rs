//! Clinic Billing Core
//!
//! Billing and medicines-inventory engine for clinic management: invoice
//! line items, stock reservation and restocking, discount/tax totals, and
//! payment reconciliation.
//!
//! # Architecture
//!
//! ```text
//! UI selection events
//!        │
//!        ▼
//!  Line-Item Builder ──── validates against / mutates ───▶ Inventory Ledger
//!        │                                                       ▲
//!        ▼                                                       │
//!  Invoice Totals Calculator                                     │
//!        │                                                       │
//!        ▼ submit                                                │
//!  Bill Lifecycle Manager ──── committed stock state ────────────┘
//!        │
//!        ▼
//!  Store (snapshot persistence collaborator)
//! ```
//!
//! All five concerns live behind the [`Engine`] facade. Drafts reserve
//! ledger stock optimistically on line add and carry an undo log so an
//! abandoned draft rolls back atomically.
//!
//! # Modules
//!
//! - [`engine`]: the `Engine` facade and its operations
//! - [`models`]: domain types (Medicine, Service, Bill, Patient)
//! - [`store`]: snapshot persistence port and implementations
//! - [`error`]: engine error taxonomy

pub mod engine;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use engine::{compute_totals, BillingStats, DraftBill, Engine};
pub use error::{EngineError, EngineResult};
pub use models::{
    AdjustmentReason, Bill, BillLineItem, BillStatus, BillTotals, DiscountMode, LineItemKind,
    Medicine, NewMedicine, Patient, PatientLookup, PaymentMethod, Service, StaticPatients,
    StockStatus,
};
pub use store::{FallbackStore, MemoryStore, SqliteStore, Store, StoreError};
