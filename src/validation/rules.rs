//! Validation rules for incoming positions.
//!
//! Checks accumulate: a batch with three bad fields reports all three.

use crate::core::{Facing, Position, MAX_COORDINATE};
use crate::validation::input::PositionInput;
use crate::validation::violations::{Axis, ValidationError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of validating one or more positions.
pub type Validated<T> = Validation<T, NonEmptyVec<ValidationError>>;

/// Validate one input found at `index` within its batch.
pub fn validate_position(index: usize, input: &PositionInput) -> Validated<Position> {
    let facing = input.facing.parse::<Facing>().ok();

    let checks = vec![
        check_axis(index, Axis::X, input.x),
        check_axis(index, Axis::Y, input.y),
        check_facing(index, &input.facing, facing),
    ];

    match Validation::all_vec(checks) {
        Validation::Failure(errors) => Validation::Failure(errors),
        Validation::Success(_) => {
            let cell = i32::try_from(input.x).ok().zip(i32::try_from(input.y).ok());
            match (cell, facing) {
                (Some((x, y)), Some(facing)) => match Position::new(x, y, facing) {
                    Some(position) => Validation::success(position),
                    None => out_of_range(index, Axis::X, input.x),
                },
                (None, _) => out_of_range(index, Axis::X, input.x),
                (_, None) => Validation::fail(ValidationError::UnknownFacing {
                    index,
                    value: input.facing.clone(),
                }),
            }
        }
    }
}

/// Validate an ordered batch, keeping order in the result.
///
/// Errors from every entry are reported together. An empty batch is
/// rejected.
pub fn validate_batch(inputs: &[PositionInput]) -> Validated<Vec<Position>> {
    if inputs.is_empty() {
        return Validation::fail(ValidationError::EmptyBatch);
    }

    let checks: Vec<Validated<Position>> = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| validate_position(index, input))
        .collect();

    Validation::all_vec(checks)
}

fn check_axis(index: usize, axis: Axis, value: i64) -> Validated<()> {
    if (0..=i64::from(MAX_COORDINATE)).contains(&value) {
        Validation::success(())
    } else {
        out_of_range(index, axis, value)
    }
}

fn check_facing(index: usize, raw: &str, parsed: Option<Facing>) -> Validated<()> {
    match parsed {
        Some(_) => Validation::success(()),
        None => Validation::fail(ValidationError::UnknownFacing {
            index,
            value: raw.to_string(),
        }),
    }
}

fn out_of_range<T>(index: usize, axis: Axis, value: i64) -> Validated<T> {
    Validation::fail(ValidationError::CoordinateOutOfRange {
        index,
        axis,
        value,
        max: MAX_COORDINATE,
    })
}
