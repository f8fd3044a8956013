//! The robot state machine.

use crate::core::{
    Facing, Guard, Position, PositionHistory, Report, RobotState, Rotation, SessionId,
};
use crate::machine::command::{Command, CommandOutcome, IgnoreReason};
use chrono::Utc;

type PositionObserver = Box<dyn Fn(&Position) + Send + Sync>;

/// A robot on a 5×5 table.
///
/// Commands that would take the robot off the table, or that arrive before
/// it has been placed, are ignored. Every accepted change is appended to the
/// machine's history and passed to registered observers.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Facing, Report, Rotation};
/// use toy_robot::machine::RobotStateMachine;
///
/// let mut robot = RobotStateMachine::new();
/// robot.place(0, 0, None);
/// robot.rotate(Rotation::Clockwise);
/// robot.move_forward();
///
/// let report = robot.report();
/// assert_eq!(report.to_string(), "1,0,EAST");
/// ```
pub struct RobotStateMachine {
    session: SessionId,
    state: RobotState,
    guards: Vec<Guard>,
    history: PositionHistory,
    observers: Vec<PositionObserver>,
}

impl RobotStateMachine {
    /// Create an unplaced robot with a fresh session id.
    pub fn new() -> Self {
        Self::with_session(SessionId::new())
    }

    /// Create an unplaced robot bound to an existing session.
    pub fn with_session(session: SessionId) -> Self {
        Self {
            session,
            state: RobotState::Unplaced,
            guards: Vec::new(),
            history: PositionHistory::new(),
            observers: Vec::new(),
        }
    }

    /// Add a movement guard. Guards apply to placements, moves, steps and rotations.
    pub fn add_guard(&mut self, guard: Guard) {
        self.guards.push(guard);
    }

    /// Register a callback run after every accepted position change.
    pub fn on_position_changed<F>(&mut self, observer: F)
    where
        F: Fn(&Position) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Get current state (pure)
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn is_placed(&self) -> bool {
        self.state.is_placed()
    }

    /// Accepted positions since the last placement (pure)
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Put the robot on `(x, y)`, facing north unless told otherwise.
    ///
    /// Placement always wins over the current state and starts a new
    /// history. Off-table or guarded cells are ignored.
    pub fn place(&mut self, x: i32, y: i32, facing: Option<Facing>) -> CommandOutcome {
        let Some(position) = Position::new(x, y, facing.unwrap_or_default()) else {
            return self.ignore("place", IgnoreReason::OffTable);
        };
        if !self.allows(&position) {
            return self.ignore("place", IgnoreReason::Blocked);
        }

        self.history = PositionHistory::new();
        self.accept("place", position)
    }

    /// Advance one cell in the facing direction.
    pub fn move_forward(&mut self) -> CommandOutcome {
        let Some(current) = self.state.position() else {
            return self.ignore("move", IgnoreReason::NotPlaced);
        };
        self.advance("move", current)
    }

    /// Turn 90° without leaving the cell.
    ///
    /// Guards see the turned pose, so a guard on facing can refuse the turn.
    pub fn rotate(&mut self, rotation: Rotation) -> CommandOutcome {
        let Some(current) = self.state.position() else {
            return self.ignore("rotate", IgnoreReason::NotPlaced);
        };
        let turned = current.with_facing(current.facing().rotate(rotation));
        if !self.allows(&turned) {
            return self.ignore("rotate", IgnoreReason::Blocked);
        }
        self.accept("rotate", turned)
    }

    /// Face `facing` and advance one cell.
    ///
    /// The turn only takes effect together with the move: at the edge of the
    /// table the robot keeps its old facing as well as its cell.
    pub fn step(&mut self, facing: Facing) -> CommandOutcome {
        let Some(current) = self.state.position() else {
            return self.ignore("step", IgnoreReason::NotPlaced);
        };
        self.advance("step", current.with_facing(facing))
    }

    /// Current pose, or [`Report::Unplaced`] before the first placement.
    pub fn report(&self) -> Report {
        self.state.report()
    }

    /// Overwrite the current position with an authoritative one.
    ///
    /// Used when replaying positions from another source. Guards are not
    /// consulted; the incoming position is trusted.
    pub fn apply(&mut self, position: Position) -> CommandOutcome {
        self.accept("apply", position)
    }

    /// Apply positions in order, returning the final one.
    pub fn apply_batch<I>(&mut self, positions: I) -> Option<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        positions
            .into_iter()
            .map(|position| self.apply(position))
            .last()
            .and_then(|outcome| outcome.position())
    }

    /// Dispatch a [`Command`].
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Place { x, y, facing } => self.place(x, y, facing),
            Command::Move => self.move_forward(),
            Command::Rotate { rotation } => self.rotate(rotation),
            Command::Step { facing } => self.step(facing),
            Command::Report => CommandOutcome::Reported {
                report: self.report(),
            },
        }
    }

    fn advance(&mut self, command: &'static str, from: Position) -> CommandOutcome {
        let Some(next) = from.advanced() else {
            return self.ignore(command, IgnoreReason::OffTable);
        };
        if !self.allows(&next) {
            return self.ignore(command, IgnoreReason::Blocked);
        }
        self.accept(command, next)
    }

    fn allows(&self, position: &Position) -> bool {
        self.guards.iter().all(|guard| guard.check(position))
    }

    fn accept(&mut self, command: &'static str, position: Position) -> CommandOutcome {
        self.state = RobotState::Placed(position);
        self.history = std::mem::take(&mut self.history).record(position, Utc::now());
        tracing::debug!(
            session = %self.session,
            command,
            x = position.x(),
            y = position.y(),
            facing = %position.facing(),
            "Robot position changed"
        );
        for observer in &self.observers {
            observer(&position);
        }
        CommandOutcome::Accepted { position }
    }

    fn ignore(&self, command: &'static str, reason: IgnoreReason) -> CommandOutcome {
        tracing::debug!(
            session = %self.session,
            command,
            ?reason,
            state = self.state.name(),
            "Robot ignored command"
        );
        CommandOutcome::Ignored { reason }
    }

    pub(crate) fn restore(
        session: SessionId,
        state: RobotState,
        history: PositionHistory,
    ) -> Self {
        Self {
            session,
            state,
            guards: Vec::new(),
            history,
            observers: Vec::new(),
        }
    }
}

impl Default for RobotStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RobotStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotStateMachine")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("guards", &self.guards.len())
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn pos(x: i32, y: i32, facing: Facing) -> Position {
        Position::new(x, y, facing).unwrap()
    }

    fn placed_at(x: i32, y: i32, facing: Facing) -> RobotStateMachine {
        let mut robot = RobotStateMachine::new();
        robot.place(x, y, Some(facing));
        robot
    }

    #[test]
    fn new_robot_reports_unplaced() {
        let robot = RobotStateMachine::new();
        assert_eq!(robot.report(), Report::Unplaced);
        assert!(!robot.is_placed());
        assert!(robot.history().is_empty());
    }

    #[test]
    fn commands_before_place_are_ignored() {
        let mut robot = RobotStateMachine::new();
        let not_placed = CommandOutcome::Ignored {
            reason: IgnoreReason::NotPlaced,
        };

        assert_eq!(robot.move_forward(), not_placed);
        assert_eq!(robot.rotate(Rotation::Clockwise), not_placed);
        assert_eq!(robot.step(Facing::East), not_placed);
        assert_eq!(robot.report(), Report::Unplaced);
    }

    #[test]
    fn place_defaults_to_north() {
        let mut robot = RobotStateMachine::new();
        let outcome = robot.place(2, 3, None);

        assert_eq!(
            outcome,
            CommandOutcome::Accepted {
                position: pos(2, 3, Facing::North)
            }
        );
        assert_eq!(robot.report(), Report::Placed(pos(2, 3, Facing::North)));
    }

    #[test]
    fn place_off_table_is_ignored() {
        let mut robot = placed_at(1, 1, Facing::East);

        let outcome = robot.place(5, 0, None);

        assert_eq!(
            outcome,
            CommandOutcome::Ignored {
                reason: IgnoreReason::OffTable
            }
        );
        assert_eq!(robot.report(), Report::Placed(pos(1, 1, Facing::East)));
    }

    #[test]
    fn replacing_clears_history() {
        let mut robot = placed_at(0, 0, Facing::South);
        robot.move_forward();
        robot.move_forward();
        assert_eq!(robot.history().len(), 3);

        robot.place(4, 4, Some(Facing::West));

        assert_eq!(robot.history().len(), 1);
        assert_eq!(robot.history().path(), vec![pos(4, 4, Facing::West)]);
    }

    #[test]
    fn rotate_then_move_east() {
        let mut robot = RobotStateMachine::new();
        robot.place(0, 0, None);

        robot.rotate(Rotation::Clockwise);
        assert_eq!(robot.report(), Report::Placed(pos(0, 0, Facing::East)));

        robot.move_forward();
        assert_eq!(robot.report(), Report::Placed(pos(1, 0, Facing::East)));
    }

    #[test]
    fn move_at_south_edge_is_ignored() {
        let mut robot = placed_at(0, 4, Facing::South);

        let outcome = robot.move_forward();

        assert_eq!(
            outcome,
            CommandOutcome::Ignored {
                reason: IgnoreReason::OffTable
            }
        );
        assert_eq!(robot.report(), Report::Placed(pos(0, 4, Facing::South)));
    }

    #[test]
    fn top_left_corner_facing_north_never_moves() {
        let mut robot = placed_at(0, 0, Facing::North);
        for _ in 0..10 {
            robot.move_forward();
        }
        assert_eq!(robot.report(), Report::Placed(pos(0, 0, Facing::North)));
        assert_eq!(robot.history().len(), 1);
    }

    #[test]
    fn step_turns_and_moves() {
        let mut robot = placed_at(2, 2, Facing::North);

        robot.step(Facing::West);

        assert_eq!(robot.report(), Report::Placed(pos(1, 2, Facing::West)));
    }

    #[test]
    fn blocked_step_keeps_facing() {
        let mut robot = placed_at(0, 2, Facing::North);

        let outcome = robot.step(Facing::West);

        assert!(!outcome.is_accepted());
        assert_eq!(robot.report(), Report::Placed(pos(0, 2, Facing::North)));
    }

    #[test]
    fn guard_blocks_move_into_cell() {
        let mut robot = placed_at(0, 0, Facing::East);
        robot.add_guard(Guard::blocked_cells(vec![(1, 0)]));

        let outcome = robot.move_forward();

        assert_eq!(
            outcome,
            CommandOutcome::Ignored {
                reason: IgnoreReason::Blocked
            }
        );
        assert_eq!(robot.report(), Report::Placed(pos(0, 0, Facing::East)));
    }

    #[test]
    fn facing_guard_blocks_rotation() {
        let mut robot = placed_at(3, 3, Facing::North);
        robot.add_guard(Guard::new(|p: &Position| p.facing() != Facing::West));

        let outcome = robot.rotate(Rotation::Counterclockwise);

        assert_eq!(
            outcome,
            CommandOutcome::Ignored {
                reason: IgnoreReason::Blocked
            }
        );
        assert_eq!(robot.report(), Report::Placed(pos(3, 3, Facing::North)));
        assert!(robot.rotate(Rotation::Clockwise).is_accepted());
    }

    #[test]
    fn guard_blocks_placement() {
        let mut robot = RobotStateMachine::new();
        robot.add_guard(Guard::blocked_cells(vec![(2, 2)]));

        assert_eq!(
            robot.place(2, 2, None),
            CommandOutcome::Ignored {
                reason: IgnoreReason::Blocked
            }
        );
        assert!(!robot.is_placed());
    }

    #[test]
    fn observers_see_every_accepted_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut robot = RobotStateMachine::new();
        robot.on_position_changed(move |p| sink.lock().unwrap().push(*p));

        robot.move_forward(); // ignored, not placed
        robot.place(0, 1, None);
        robot.move_forward();
        robot.move_forward(); // ignored, north edge
        robot.rotate(Rotation::Counterclockwise);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                pos(0, 1, Facing::North),
                pos(0, 0, Facing::North),
                pos(0, 0, Facing::West),
            ]
        );
    }

    #[test]
    fn apply_batch_returns_final_position() {
        let mut robot = RobotStateMachine::new();

        let last = robot.apply_batch(vec![
            pos(0, 0, Facing::North),
            pos(1, 0, Facing::East),
            pos(2, 0, Facing::East),
        ]);

        assert_eq!(last, Some(pos(2, 0, Facing::East)));
        assert_eq!(robot.report(), Report::Placed(pos(2, 0, Facing::East)));
        assert_eq!(robot.history().len(), 3);
    }

    #[test]
    fn apply_empty_batch_changes_nothing() {
        let mut robot = RobotStateMachine::new();
        assert_eq!(robot.apply_batch(Vec::new()), None);
        assert!(!robot.is_placed());
    }

    #[test]
    fn execute_dispatches_commands() {
        let mut robot = RobotStateMachine::new();

        for line in ["PLACE 1,2,EAST", "MOVE", "MOVE", "LEFT", "MOVE"] {
            robot.execute(line.parse().unwrap());
        }

        assert_eq!(
            robot.execute(Command::Report),
            CommandOutcome::Reported {
                report: Report::Placed(pos(3, 1, Facing::North))
            }
        );
    }
}
