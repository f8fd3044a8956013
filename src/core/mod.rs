//! Core robot types and logic.
//!
//! This module contains the pure functional core:
//! - Grid positions, facings and rotations
//! - The robot lifecycle state and its report
//! - Guard predicates over destination cells
//! - The append-only position history
//! - Session identifiers
//!
//! Nothing in this module performs I/O.

mod guard;
mod history;
mod position;
mod session;
mod state;

pub use guard::Guard;
pub use history::{PositionHistory, PositionRecord};
pub use position::{Facing, ParseFacingError, Position, Rotation, GRID_SIZE, MAX_COORDINATE};
pub use session::SessionId;
pub use state::{Report, RobotState};
