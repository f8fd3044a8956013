//! Grid coordinates, facings and rotations.
//!
//! The grid origin is the top-left cell and `y` grows downward, so facing
//! north decreases `y` and facing south increases it. Cell `(0, 4)` is the
//! bottom-left corner of the board.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells along each side of the table.
pub const GRID_SIZE: u8 = 5;

/// Highest valid coordinate on either axis.
pub const MAX_COORDINATE: u8 = GRID_SIZE - 1;

/// Compass direction the robot is facing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// All facings in clockwise order starting from north.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Facing after a 90° turn in the given direction.
    ///
    /// ```rust
    /// use toy_robot::core::{Facing, Rotation};
    ///
    /// assert_eq!(Facing::North.rotate(Rotation::Clockwise), Facing::East);
    /// assert_eq!(Facing::North.rotate(Rotation::Counterclockwise), Facing::West);
    /// ```
    pub fn rotate(self, rotation: Rotation) -> Self {
        match (self, rotation) {
            (Self::North, Rotation::Clockwise) => Self::East,
            (Self::East, Rotation::Clockwise) => Self::South,
            (Self::South, Rotation::Clockwise) => Self::West,
            (Self::West, Rotation::Clockwise) => Self::North,
            (Self::North, Rotation::Counterclockwise) => Self::West,
            (Self::West, Rotation::Counterclockwise) => Self::South,
            (Self::South, Rotation::Counterclockwise) => Self::East,
            (Self::East, Rotation::Counterclockwise) => Self::North,
        }
    }

    /// Unit step `(dx, dy)` taken when moving in this direction.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Lowercase wire name (`"north"`, `"east"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a facing name is not one of the four compass points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown facing '{0}', expected one of north, east, south, west")]
pub struct ParseFacingError(pub String);

impl FromStr for Facing {
    type Err = ParseFacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Self::North),
            "east" => Ok(Self::East),
            "south" => Ok(Self::South),
            "west" => Ok(Self::West),
            _ => Err(ParseFacingError(s.to_string())),
        }
    }
}

/// Direction of a 90° turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Clockwise,
    Counterclockwise,
}

impl Rotation {
    /// The turn that undoes this one.
    pub fn reverse(self) -> Self {
        match self {
            Self::Clockwise => Self::Counterclockwise,
            Self::Counterclockwise => Self::Clockwise,
        }
    }
}

/// A cell on the table together with the robot's facing.
///
/// Positions are immutable values and can only be built through
/// [`Position::new`], which refuses coordinates outside the grid. Every
/// `Position` in the program is therefore on the table.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Facing, Position};
///
/// let origin = Position::new(0, 0, Facing::North).unwrap();
/// assert_eq!(origin.x(), 0);
/// assert!(Position::new(5, 0, Facing::North).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Position {
    x: u8,
    y: u8,
    facing: Facing,
}

impl Position {
    /// Build a position, returning `None` if either coordinate is off the grid.
    pub fn new(x: i32, y: i32, facing: Facing) -> Option<Self> {
        let x = u8::try_from(x).ok().filter(|x| *x <= MAX_COORDINATE)?;
        let y = u8::try_from(y).ok().filter(|y| *y <= MAX_COORDINATE)?;
        Some(Self { x, y, facing })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Same cell, different facing.
    pub fn with_facing(self, facing: Facing) -> Self {
        Self { facing, ..self }
    }

    /// The position one step ahead, or `None` if that step leaves the table.
    pub fn advanced(&self) -> Option<Self> {
        let (dx, dy) = self.facing.delta();
        Self::new(
            i32::from(self.x) + i32::from(dx),
            i32::from(self.y) + i32::from(dy),
            self.facing,
        )
    }

    /// Row-major index of the cell on the rendered board.
    pub fn cell_index(&self) -> usize {
        usize::from(self.y) * usize::from(GRID_SIZE) + usize::from(self.x)
    }

    /// Inverse of [`Position::cell_index`].
    pub fn from_cell_index(index: usize, facing: Facing) -> Option<Self> {
        let size = usize::from(GRID_SIZE);
        if index >= size * size {
            return None;
        }
        let x = i32::try_from(index % size).ok()?;
        let y = i32::try_from(index / size).ok()?;
        Self::new(x, y, facing)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.x,
            self.y,
            self.facing.as_str().to_ascii_uppercase()
        )
    }
}

// Deserialization goes through the raw shape so stored data cannot smuggle in
// an off-grid cell.
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            x: u8,
            y: u8,
            facing: Facing,
        }

        let raw = Raw::deserialize(deserializer)?;
        Position::new(i32::from(raw.x), i32::from(raw.y), raw.facing).ok_or_else(|| {
            serde::de::Error::custom(format!("cell ({}, {}) is off the table", raw.x, raw.y))
        })
    }
}
