//! Wire shapes for positions arriving at the gateway.

use serde::{Deserialize, Serialize};

/// A position as received from a client, before validation.
///
/// Coordinates are wide signed integers and the facing is free text so that
/// every malformed value can be reported instead of failing at decode time.
/// Extra fields such as a client-side `id` are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInput {
    pub x: i64,
    pub y: i64,
    pub facing: String,
}

impl PositionInput {
    pub fn new(x: i64, y: i64, facing: impl Into<String>) -> Self {
        Self {
            x,
            y,
            facing: facing.into(),
        }
    }
}

impl From<crate::core::Position> for PositionInput {
    fn from(position: crate::core::Position) -> Self {
        Self::new(
            i64::from(position.x()),
            i64::from(position.y()),
            position.facing().as_str(),
        )
    }
}

/// Either one position or an ordered batch.
///
/// ```rust
/// use toy_robot::validation::PositionUpdate;
///
/// let one: PositionUpdate = serde_json::from_str(r#"{"x":1,"y":2,"facing":"east"}"#).unwrap();
/// let many: PositionUpdate = serde_json::from_str(r#"[{"x":1,"y":2,"facing":"east"}]"#).unwrap();
///
/// assert_eq!(one.into_inputs(), many.into_inputs());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionUpdate {
    One(PositionInput),
    Many(Vec<PositionInput>),
}

impl PositionUpdate {
    /// Flatten into an ordered list.
    pub fn into_inputs(self) -> Vec<PositionInput> {
        match self {
            Self::One(input) => vec![input],
            Self::Many(inputs) => inputs,
        }
    }
}

impl From<PositionInput> for PositionUpdate {
    fn from(input: PositionInput) -> Self {
        Self::One(input)
    }
}

impl From<Vec<PositionInput>> for PositionUpdate {
    fn from(inputs: Vec<PositionInput>) -> Self {
        Self::Many(inputs)
    }
}
