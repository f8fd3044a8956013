//! Snapshot error types.

use crate::core::Position;
use thiserror::Error;

/// Errors raised while saving or restoring a robot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The robot is unplaced yet the snapshot carries recorded positions
    #[error("Unplaced robot has {records} recorded position(s)")]
    UnplacedWithHistory { records: usize },

    /// The robot's position is not the last one in its history
    #[error("Robot at {current} but last recorded position is {}", describe(.recorded))]
    PositionMismatch {
        current: Position,
        recorded: Option<Position>,
    },
}

fn describe(recorded: &Option<Position>) -> String {
    recorded.map_or_else(|| "missing".to_string(), |position| position.to_string())
}
