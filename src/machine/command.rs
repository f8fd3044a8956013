//! Robot commands and their outcomes.

use crate::core::{Facing, Position, Report, Rotation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single instruction for the robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Put the robot on a cell. Facing defaults to north.
    Place {
        x: i32,
        y: i32,
        #[serde(default)]
        facing: Option<Facing>,
    },
    /// Advance one cell in the facing direction
    Move,
    /// Turn 90° in place
    Rotate { rotation: Rotation },
    /// Turn to `facing` and advance one cell (arrow-key input)
    Step { facing: Facing },
    /// Ask for the current pose
    Report,
}

impl Command {
    /// Label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Place { .. } => "place",
            Self::Move => "move",
            Self::Rotate { .. } => "rotate",
            Self::Step { .. } => "step",
            Self::Report => "report",
        }
    }
}

/// Errors raised while parsing the textual command form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("PLACE expects 'X,Y' or 'X,Y,FACING', got '{0}'")]
    InvalidPlaceArguments(String),

    #[error(transparent)]
    InvalidFacing(#[from] crate::core::ParseFacingError),
}

/// Parses the classic kata syntax: `PLACE X,Y[,F]`, `MOVE`, `LEFT`, `RIGHT`,
/// `REPORT`. Keywords are case-insensitive.
///
/// ```rust
/// use toy_robot::core::{Facing, Rotation};
/// use toy_robot::machine::Command;
///
/// let place: Command = "PLACE 1,2,EAST".parse().unwrap();
/// assert_eq!(place, Command::Place { x: 1, y: 2, facing: Some(Facing::East) });
///
/// let left: Command = "left".parse().unwrap();
/// assert_eq!(left, Command::Rotate { rotation: Rotation::Counterclockwise });
/// ```
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, char::is_whitespace);
        let keyword = parts
            .next()
            .filter(|k| !k.is_empty())
            .ok_or(ParseCommandError::Empty)?;
        let args = parts.next().map(str::trim).unwrap_or_default();

        match keyword.to_ascii_uppercase().as_str() {
            "PLACE" => parse_place(args),
            "MOVE" => Ok(Self::Move),
            "LEFT" => Ok(Self::Rotate {
                rotation: Rotation::Counterclockwise,
            }),
            "RIGHT" => Ok(Self::Rotate {
                rotation: Rotation::Clockwise,
            }),
            "REPORT" => Ok(Self::Report),
            _ => Err(ParseCommandError::UnknownCommand(keyword.to_string())),
        }
    }
}

fn parse_place(args: &str) -> Result<Command, ParseCommandError> {
    let invalid = || ParseCommandError::InvalidPlaceArguments(args.to_string());
    let fields: Vec<&str> = args.split(',').map(str::trim).collect();

    let (x, y, facing) = match fields.as_slice() {
        [x, y] => (*x, *y, None),
        [x, y, facing] => (*x, *y, Some(facing.parse::<Facing>()?)),
        _ => return Err(invalid()),
    };

    Ok(Command::Place {
        x: x.parse().map_err(|_| invalid())?,
        y: y.parse().map_err(|_| invalid())?,
        facing,
    })
}

/// Why a command left the robot where it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The robot has not been placed yet
    NotPlaced,
    /// The target cell is off the table
    OffTable,
    /// A movement guard rejected the target cell
    Blocked,
}

/// Diagnostic result of applying a command.
///
/// Ignored commands are not errors: a robot that would fall off the table
/// simply stays put. The outcome only exists so callers can tell what
/// happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The robot now stands at `position`
    Accepted { position: Position },
    /// REPORT answer
    Reported { report: Report },
    /// State unchanged
    Ignored { reason: IgnoreReason },
}

impl CommandOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Position after an accepted change.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Accepted { position } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_place_with_and_without_facing() {
        assert_eq!(
            "PLACE 0,4,SOUTH".parse::<Command>().unwrap(),
            Command::Place {
                x: 0,
                y: 4,
                facing: Some(Facing::South)
            }
        );
        assert_eq!(
            "place 3, 2".parse::<Command>().unwrap(),
            Command::Place {
                x: 3,
                y: 2,
                facing: None
            }
        );
    }

    #[test]
    fn parses_simple_keywords() {
        assert_eq!("MOVE".parse::<Command>().unwrap(), Command::Move);
        assert_eq!("  report ".parse::<Command>().unwrap(), Command::Report);
        assert_eq!(
            "RIGHT".parse::<Command>().unwrap(),
            Command::Rotate {
                rotation: Rotation::Clockwise
            }
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert!(matches!(
            "JUMP".parse::<Command>(),
            Err(ParseCommandError::UnknownCommand(_))
        ));
        assert!(matches!(
            "PLACE 1".parse::<Command>(),
            Err(ParseCommandError::InvalidPlaceArguments(_))
        ));
        assert!(matches!(
            "PLACE a,b".parse::<Command>(),
            Err(ParseCommandError::InvalidPlaceArguments(_))
        ));
        assert!(matches!(
            "PLACE 1,1,UP".parse::<Command>(),
            Err(ParseCommandError::InvalidFacing(_))
        ));
    }

    #[test]
    fn negative_place_coordinates_parse() {
        // Range checking happens in the machine, not the parser
        assert_eq!(
            "PLACE -1,0".parse::<Command>().unwrap(),
            Command::Place {
                x: -1,
                y: 0,
                facing: None
            }
        );
    }

    #[test]
    fn command_deserializes_from_tagged_json() {
        let command: Command =
            serde_json::from_str(r#"{"command":"rotate","rotation":"counterclockwise"}"#).unwrap();
        assert_eq!(
            command,
            Command::Rotate {
                rotation: Rotation::Counterclockwise
            }
        );

        let place: Command = serde_json::from_str(r#"{"command":"place","x":2,"y":3}"#).unwrap();
        assert_eq!(
            place,
            Command::Place {
                x: 2,
                y: 3,
                facing: None
            }
        );
    }

    #[test]
    fn outcome_exposes_position_only_when_accepted() {
        let pos = Position::new(1, 1, Facing::North).unwrap();
        assert_eq!(
            CommandOutcome::Accepted { position: pos }.position(),
            Some(pos)
        );
        assert!(CommandOutcome::Ignored {
            reason: IgnoreReason::OffTable
        }
        .position()
        .is_none());
    }
}
