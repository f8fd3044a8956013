//! Boundary validation for positions arriving from clients.
//!
//! Malformed input never reaches the state machine. Validation uses
//! Stillwater's `Validation` type to collect every problem in a request
//! rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use toy_robot::validation::{validate_batch, PositionInput};
//!
//! let inputs = vec![
//!     PositionInput::new(0, 0, "north"),
//!     PositionInput::new(5, 0, "east"),
//!     PositionInput::new(0, 0, "up"),
//! ];
//!
//! assert!(validate_batch(&inputs).is_failure());
//! ```

pub mod input;
pub mod rules;
pub mod violations;

pub use input::{PositionInput, PositionUpdate};
pub use rules::{validate_batch, validate_position, Validated};
pub use violations::{Axis, ValidationError};
