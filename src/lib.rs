//! Toy Robot: a robot on a 5×5 table
//!
//! The robot accepts PLACE, MOVE, LEFT/RIGHT and REPORT. It ignores any
//! command that would push it off the table or that arrives before it has
//! been placed. Accepted positions are recorded in a per-session log and
//! broadcast to live viewers.
//!
//! The crate follows a "pure core, imperative shell" layout. The state
//! machine is pure and synchronous; storage and broadcasting live in the
//! gateway as Stillwater effects run against an environment.
//!
//! # Core Concepts
//!
//! - **Core**: positions, facings, the robot state and its history
//! - **Machine**: the command-driven state machine
//! - **Validation**: boundary checks that collect every malformed field
//! - **Gateway**: per-session store, event relay and the operations on them
//! - **Client**: mirrors a local robot to the gateway, queuing while offline
//! - **Snapshot**: save a robot and resume it later
//!
//! # Grid convention
//!
//! The origin is the top-left cell and `y` grows downward: facing north a
//! MOVE decreases `y`, facing south it increases `y`.
//!
//! # Example
//!
//! ```rust
//! use toy_robot::machine::{Command, RobotStateMachine};
//!
//! let mut robot = RobotStateMachine::new();
//! for line in ["PLACE 0,0", "RIGHT", "MOVE", "REPORT"] {
//!     robot.execute(line.parse::<Command>().unwrap());
//! }
//!
//! assert_eq!(robot.report().to_string(), "1,0,EAST");
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod core;
pub mod gateway;
pub mod machine;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use client::RobotClient;
pub use config::RobotConfig;
pub use crate::core::{Facing, Position, PositionRecord, Report, RobotState, Rotation, SessionId};
pub use machine::{Command, CommandOutcome, RobotStateMachine};
