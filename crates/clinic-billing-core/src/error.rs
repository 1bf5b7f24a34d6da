//! Engine error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by billing and inventory operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("invalid payment: {0}")]
    InvalidPayment(String),

    #[error("invalid stock adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
