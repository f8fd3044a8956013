//! Build errors for the robot builder.

use thiserror::Error;

/// Errors that can occur when building a robot state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial cell ({x}, {y}) is off the table")]
    InitialOffTable { x: i32, y: i32 },

    #[error("Initial cell ({x}, {y}) is rejected by a movement guard")]
    InitialBlocked { x: u8, y: u8 },
}
