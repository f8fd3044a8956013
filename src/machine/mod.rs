//! The robot state machine and the commands it understands.
//!
//! # Key Concepts
//!
//! - **Commands**: PLACE, MOVE, rotations, arrow-key steps and REPORT
//! - **Outcomes**: every command reports whether it was accepted or ignored
//! - **Machine**: owns the robot state and its accepted-position history
//!
//! Ignoring a command is never an error. The robot refuses to fall off the
//! table and refuses to move before it is placed, and says so only through
//! the returned [`CommandOutcome`].

mod command;
mod robot;

pub use command::{Command, CommandOutcome, IgnoreReason, ParseCommandError};
pub use robot::RobotStateMachine;
