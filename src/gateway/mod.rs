//! The storage and relay shell around the robot.
//!
//! This module is the imperative shell: it persists accepted positions and
//! broadcasts them to viewers. Operations are Stillwater effects run against
//! a [`RobotEnv`], and every call names the robot session it acts on.
//!
//! # Key Concepts
//!
//! - **Store**: append-only per-session position log ([`PositionStore`])
//! - **Relay**: broadcast channel of [`RobotEvent`]s for live viewers
//! - **Operations**: `create_robot`, `update_position`, `latest_position`,
//!   `latest_history`

mod error;
mod relay;
mod service;
mod store;

pub use error::{ServiceError, StoreError};
pub use relay::{PositionRelay, RobotEvent};
pub use service::{create_robot, latest_history, latest_position, update_position, RobotEnv};
pub use store::{InMemoryPositionStore, PositionStore};
