//! Robot lifecycle state and the report it produces.

use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the robot is on the table, and where.
///
/// A robot starts `Unplaced` and only leaves that state through a valid
/// placement. There is no terminal state.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Facing, Position, RobotState};
///
/// let state = RobotState::default();
/// assert!(!state.is_placed());
///
/// let placed = RobotState::Placed(Position::new(1, 2, Facing::South).unwrap());
/// assert_eq!(placed.name(), "Placed");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RobotState {
    #[default]
    Unplaced,
    Placed(Position),
}

impl RobotState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Unplaced => "Unplaced",
            Self::Placed(_) => "Placed",
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    /// Current position, if the robot is on the table.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Unplaced => None,
            Self::Placed(position) => Some(*position),
        }
    }

    /// Snapshot of the state as a REPORT answer.
    pub fn report(&self) -> Report {
        match self {
            Self::Unplaced => Report::Unplaced,
            Self::Placed(position) => Report::Placed(*position),
        }
    }
}

/// Answer to a REPORT command.
///
/// An unplaced robot reports `Unplaced` explicitly rather than a default
/// cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Report {
    Unplaced,
    Placed(Position),
}

impl Report {
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Unplaced => None,
            Self::Placed(position) => Some(*position),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unplaced => f.write_str("ROBOT MISSING"),
            Self::Placed(position) => write!(f, "{}", position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Facing;

    #[test]
    fn default_state_is_unplaced() {
        let state = RobotState::default();
        assert_eq!(state, RobotState::Unplaced);
        assert!(state.position().is_none());
        assert_eq!(state.report(), Report::Unplaced);
    }

    #[test]
    fn placed_state_exposes_position() {
        let pos = Position::new(3, 1, Facing::West).unwrap();
        let state = RobotState::Placed(pos);

        assert!(state.is_placed());
        assert_eq!(state.position(), Some(pos));
        assert_eq!(state.report(), Report::Placed(pos));
    }

    #[test]
    fn report_displays_kata_text() {
        let pos = Position::new(0, 4, Facing::South).unwrap();
        assert_eq!(Report::Placed(pos).to_string(), "0,4,SOUTH");
        assert_eq!(Report::Unplaced.to_string(), "ROBOT MISSING");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = RobotState::Placed(Position::new(2, 2, Facing::East).unwrap());
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: RobotState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
