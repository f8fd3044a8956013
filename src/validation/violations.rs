//! Validation errors for incoming positions.

use thiserror::Error;

/// One problem found in a batch of incoming positions.
///
/// `index` is the entry's offset within the batch (0 for a single
/// position).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Position {index}: {axis} = {value} is outside 0..={max}")]
    CoordinateOutOfRange {
        index: usize,
        axis: Axis,
        value: i64,
        max: u8,
    },

    #[error("Position {index}: unknown facing '{value}'")]
    UnknownFacing { index: usize, value: String },

    #[error("Position batch is empty")]
    EmptyBatch,
}

/// Grid axis named in a coordinate error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}
