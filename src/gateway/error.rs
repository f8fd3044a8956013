//! Gateway error types.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors raised by a position store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Position store lock poisoned")]
    Poisoned,
}

/// Errors returned by gateway operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Rejected position update with {} problem(s)", .0.len())]
    InvalidPositions(Vec<ValidationError>),

    #[error(transparent)]
    Store(#[from] StoreError),
}
