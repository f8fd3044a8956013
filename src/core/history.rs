//! Position history tracking.
//!
//! An append-only log of accepted positions. Each entry carries a
//! per-session sequence id and the time it was recorded; the log answers
//! "latest position" and "last N positions" queries.

use super::position::{Facing, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One accepted position in the log.
///
/// Serialized in the record shape viewers consume:
/// `{"id":1,"x":0,"y":0,"facing":"north","createdAt":"..."}`.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Facing, Position, PositionHistory};
/// use chrono::Utc;
///
/// let history = PositionHistory::new()
///     .record(Position::new(0, 0, Facing::North).unwrap(), Utc::now());
///
/// let latest = history.latest().unwrap();
/// assert_eq!(latest.id, 1);
/// assert_eq!(latest.facing(), Facing::North);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordShape", into = "RecordShape")]
pub struct PositionRecord {
    /// Sequence number within the session, starting at 1
    pub id: u64,
    /// The accepted position
    pub position: Position,
    /// When the position was recorded
    pub created_at: DateTime<Utc>,
}

// Flat wire shape. Must stay a plain struct (no `#[serde(flatten)]`) so
// bincode can encode it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordShape {
    id: u64,
    x: u8,
    y: u8,
    facing: Facing,
    created_at: DateTime<Utc>,
}

impl From<PositionRecord> for RecordShape {
    fn from(record: PositionRecord) -> Self {
        Self {
            id: record.id,
            x: record.position.x(),
            y: record.position.y(),
            facing: record.position.facing(),
            created_at: record.created_at,
        }
    }
}

impl TryFrom<RecordShape> for PositionRecord {
    type Error = String;

    fn try_from(shape: RecordShape) -> Result<Self, Self::Error> {
        let position = Position::new(i32::from(shape.x), i32::from(shape.y), shape.facing)
            .ok_or_else(|| {
                format!(
                    "record {} holds off-table cell ({}, {})",
                    shape.id, shape.x, shape.y
                )
            })?;
        Ok(Self {
            id: shape.id,
            position,
            created_at: shape.created_at,
        })
    }
}

impl PositionRecord {
    pub fn x(&self) -> u8 {
        self.position.x()
    }

    pub fn y(&self) -> u8 {
        self.position.y()
    }

    pub fn facing(&self) -> Facing {
        self.position.facing()
    }
}

/// Ordered log of accepted positions.
///
/// `record` consumes the history and hands back the extended one, so a
/// history value is never changed behind a caller's back.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Facing, Position, PositionHistory};
/// use chrono::Utc;
///
/// let mut history = PositionHistory::new();
/// for x in 0..3 {
///     history = history.record(Position::new(x, 0, Facing::East).unwrap(), Utc::now());
/// }
///
/// let last_two: Vec<u8> = history.latest_n(2).iter().map(|r| r.x()).collect();
/// assert_eq!(last_two, vec![1, 2]); // oldest first
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHistory {
    records: Vec<PositionRecord>,
}

impl PositionHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a position, returning the extended history.
    pub fn record(mut self, position: Position, created_at: DateTime<Utc>) -> Self {
        let id = self.records.last().map_or(1, |last| last.id + 1);
        self.records.push(PositionRecord {
            id,
            position,
            created_at,
        });
        self
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&PositionRecord> {
        self.records.last()
    }

    /// Up to `count` most recent records, oldest first.
    pub fn latest_n(&self, count: usize) -> &[PositionRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }

    /// Positions visited, in order.
    pub fn path(&self) -> Vec<Position> {
        self.records.iter().map(|r| r.position).collect()
    }

    /// Time between the first and last record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.created_at.signed_duration_since(first.created_at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32, facing: Facing) -> Position {
        Position::new(x, y, facing).unwrap()
    }

    #[test]
    fn new_history_is_empty() {
        let history = PositionHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.latest_n(5).is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_assigns_sequential_ids() {
        let history = PositionHistory::new()
            .record(pos(0, 0, Facing::North), Utc::now())
            .record(pos(0, 1, Facing::South), Utc::now())
            .record(pos(0, 2, Facing::South), Utc::now());

        let ids: Vec<u64> = history.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn latest_returns_last_recorded() {
        let history = PositionHistory::new()
            .record(pos(0, 0, Facing::North), Utc::now())
            .record(pos(1, 0, Facing::East), Utc::now());

        assert_eq!(history.latest().unwrap().position, pos(1, 0, Facing::East));
    }

    #[test]
    fn latest_n_is_chronological_and_bounded() {
        let mut history = PositionHistory::new();
        for x in 0..5 {
            history = history.record(pos(x, 0, Facing::East), Utc::now());
        }

        let xs: Vec<u8> = history.latest_n(3).iter().map(|r| r.x()).collect();
        assert_eq!(xs, vec![2, 3, 4]);

        assert_eq!(history.latest_n(50).len(), 5);
        assert!(history.latest_n(0).is_empty());
    }

    #[test]
    fn path_returns_positions_in_order() {
        let history = PositionHistory::new()
            .record(pos(2, 2, Facing::West), Utc::now())
            .record(pos(1, 2, Facing::West), Utc::now());

        assert_eq!(
            history.path(),
            vec![pos(2, 2, Facing::West), pos(1, 2, Facing::West)]
        );
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = PositionHistory::new()
            .record(pos(0, 0, Facing::North), start)
            .record(
                pos(0, 1, Facing::South),
                start + chrono::Duration::milliseconds(250),
            );

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn record_serializes_flat_with_camel_case_timestamp() {
        let history = PositionHistory::new().record(pos(3, 4, Facing::South), Utc::now());
        let value = serde_json::to_value(history.latest().unwrap()).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["x"], 3);
        assert_eq!(value["y"], 4);
        assert_eq!(value["facing"], "south");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = PositionHistory::new()
            .record(pos(0, 0, Facing::North), Utc::now())
            .record(pos(1, 0, Facing::East), Utc::now());

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: PositionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
