//! Builder for constructing robot state machines.

use crate::builder::error::BuildError;
use crate::core::{Facing, Guard, Position, SessionId};
use crate::machine::RobotStateMachine;

/// Builder for constructing robot state machines with a fluent API.
///
/// # Example
///
/// ```
/// use toy_robot::builder::RobotBuilder;
/// use toy_robot::core::Facing;
///
/// let robot = RobotBuilder::new()
///     .placed_at(2, 2, Facing::South)
///     .blocked_cells(vec![(2, 3)])
///     .build()
///     .unwrap();
///
/// assert_eq!(robot.report().to_string(), "2,2,SOUTH");
/// ```
#[derive(Default)]
pub struct RobotBuilder {
    session: Option<SessionId>,
    initial: Option<(i32, i32, Facing)>,
    guards: Vec<Guard>,
}

impl RobotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the robot to an existing session. A fresh one is used otherwise.
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Start the robot on a cell instead of unplaced.
    pub fn placed_at(mut self, x: i32, y: i32, facing: Facing) -> Self {
        self.initial = Some((x, y, facing));
        self
    }

    /// Add a movement guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Add a guard using a closure.
    ///
    /// The closure sees the full destination pose, facing included, and is
    /// consulted on placement, moves, steps and rotations.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Position) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Mark cells the robot may never enter.
    pub fn blocked_cells(self, cells: Vec<(u8, u8)>) -> Self {
        self.guard(Guard::blocked_cells(cells))
    }

    /// Build the state machine.
    /// Returns an error if the initial cell is off the table or guarded.
    pub fn build(self) -> Result<RobotStateMachine, BuildError> {
        let mut machine = RobotStateMachine::with_session(self.session.unwrap_or_default());
        for guard in self.guards {
            machine.add_guard(guard);
        }

        if let Some((x, y, facing)) = self.initial {
            let position =
                Position::new(x, y, facing).ok_or(BuildError::InitialOffTable { x, y })?;
            if !machine.place(x, y, Some(facing)).is_accepted() {
                return Err(BuildError::InitialBlocked {
                    x: position.x(),
                    y: position.y(),
                });
            }
        }

        Ok(machine)
    }
}
