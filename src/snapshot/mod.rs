//! Save and resume a robot.
//!
//! A snapshot captures a machine's session, current state and history so a
//! robot can survive a process restart. Guards and observers are behaviour,
//! not data, and are not captured; re-attach them after resuming.

use crate::core::{PositionHistory, RobotState, SessionId};
use crate::machine::RobotStateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a robot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Session the robot belongs to
    pub session: SessionId,

    /// Robot state at snapshot time
    pub state: RobotState,

    /// Accepted positions since the last placement
    pub history: PositionHistory,
}

impl Snapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, checking version and consistency.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()
    }

    /// Encode in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the binary format, checking version and consistency.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()
    }

    fn validate(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let latest = self.history.latest().map(|record| record.position);
        match (self.state.position(), latest) {
            (None, None) => Ok(self),
            (Some(current), Some(last)) if current == last => Ok(self),
            (None, Some(_)) => Err(SnapshotError::UnplacedWithHistory {
                records: self.history.len(),
            }),
            (Some(current), recorded) => {
                Err(SnapshotError::PositionMismatch { current, recorded })
            }
        }
    }
}

impl RobotStateMachine {
    /// Capture the machine's data in a [`Snapshot`].
    pub fn checkpoint(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            session: self.session(),
            state: *self.state(),
            history: self.history().clone(),
        }
    }

    /// Rebuild a machine from a snapshot.
    pub fn resume(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let snapshot = snapshot.validate()?;
        tracing::info!(
            session = %snapshot.session,
            snapshot = %snapshot.id,
            state = snapshot.state.name(),
            "Resuming robot from snapshot"
        );
        Ok(Self::restore(
            snapshot.session,
            snapshot.state,
            snapshot.history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Facing, Position, Report, Rotation};

    fn walked_robot() -> RobotStateMachine {
        let mut robot = RobotStateMachine::new();
        robot.place(1, 1, Some(Facing::South));
        robot.move_forward();
        robot.rotate(Rotation::Counterclockwise);
        robot
    }

    #[test]
    fn json_snapshot_resumes_same_robot() {
        let robot = walked_robot();
        let json = robot.checkpoint().to_json().unwrap();

        let resumed = RobotStateMachine::resume(Snapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(resumed.session(), robot.session());
        assert_eq!(resumed.report(), robot.report());
        assert_eq!(resumed.history(), robot.history());
    }

    #[test]
    fn binary_snapshot_resumes_same_robot() {
        let robot = walked_robot();
        let bytes = robot.checkpoint().to_bytes().unwrap();

        let resumed = RobotStateMachine::resume(Snapshot::from_bytes(&bytes).unwrap()).unwrap();

        assert_eq!(
            resumed.report(),
            Report::Placed(Position::new(1, 2, Facing::East).unwrap())
        );
        assert_eq!(resumed.history().len(), 3);
    }

    #[test]
    fn unplaced_robot_round_trips() {
        let robot = RobotStateMachine::new();
        let snapshot = Snapshot::from_json(&robot.checkpoint().to_json().unwrap()).unwrap();
        assert_eq!(snapshot.state, RobotState::Unplaced);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = walked_robot().checkpoint();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();

        let result = Snapshot::from_json(&json);

        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn mismatched_state_is_rejected() {
        let mut snapshot = walked_robot().checkpoint();
        snapshot.state = RobotState::Placed(Position::new(4, 4, Facing::North).unwrap());

        let result = RobotStateMachine::resume(snapshot);

        match result {
            Err(SnapshotError::PositionMismatch { current, recorded }) => {
                assert_eq!(current, Position::new(4, 4, Facing::North).unwrap());
                assert_eq!(recorded, Some(Position::new(1, 2, Facing::East).unwrap()));
            }
            other => panic!("Expected PositionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn unplaced_robot_with_history_is_rejected() {
        let mut snapshot = walked_robot().checkpoint();
        snapshot.state = RobotState::Unplaced;

        let result = RobotStateMachine::resume(snapshot);

        assert!(matches!(
            result,
            Err(SnapshotError::UnplacedWithHistory { records: 3 })
        ));
    }

    #[test]
    fn placed_robot_without_history_is_rejected() {
        let mut snapshot = RobotStateMachine::new().checkpoint();
        snapshot.state = RobotState::Placed(Position::new(0, 0, Facing::North).unwrap());

        let err = RobotStateMachine::resume(snapshot).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Robot at 0,0,NORTH but last recorded position is missing"
        );
    }

    #[test]
    fn garbage_input_fails_to_decode() {
        assert!(matches!(
            Snapshot::from_json("not json"),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Snapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Binary(_))
        ));
    }
}
