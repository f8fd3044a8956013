//! Builder API for ergonomic robot construction.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::RobotBuilder;
