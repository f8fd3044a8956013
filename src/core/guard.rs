//! Guard predicates for controlling robot movement.
//!
//! Guards are pure boolean functions over a destination position. The grid
//! bound is enforced by [`Position`] itself; guards add further constraints
//! such as blocked cells.

use super::position::Position;

/// Pure predicate that decides whether the robot may occupy a position.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Facing, Guard, Position};
///
/// // Keep the robot out of the centre cell
/// let avoid_centre = Guard::new(|p: &Position| (p.x(), p.y()) != (2, 2));
///
/// assert!(avoid_centre.check(&Position::new(1, 2, Facing::East).unwrap()));
/// assert!(!avoid_centre.check(&Position::new(2, 2, Facing::East).unwrap()));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&Position) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Position) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that rejects a fixed set of cells, whatever the facing.
    pub fn blocked_cells(cells: Vec<(u8, u8)>) -> Self {
        Self::new(move |p: &Position| !cells.contains(&(p.x(), p.y())))
    }

    /// Check if the guard allows the robot to occupy `position`.
    pub fn check(&self, position: &Position) -> bool {
        (self.predicate)(position)
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Facing;

    fn at(x: i32, y: i32) -> Position {
        Position::new(x, y, Facing::North).unwrap()
    }

    #[test]
    fn guard_allows_matching_positions() {
        let guard = Guard::new(|p: &Position| p.x() == 0);

        assert!(guard.check(&at(0, 3)));
        assert!(!guard.check(&at(1, 3)));
    }

    #[test]
    fn blocked_cells_ignore_facing() {
        let guard = Guard::blocked_cells(vec![(1, 1)]);

        assert!(!guard.check(&at(1, 1)));
        assert!(!guard.check(&at(1, 1).with_facing(Facing::West)));
        assert!(guard.check(&at(1, 2)));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::blocked_cells(vec![(4, 4)]);
        let position = at(4, 4);

        assert_eq!(guard.check(&position), guard.check(&position));
    }
}
