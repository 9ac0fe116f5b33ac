//! Wall-following boundary tracer
//!
//! Walks the outline of a 4-connected set of "solid" cells, keeping the
//! outside on its left, and records a corner every time it changes direction.
//! The result is the minimal-vertex ring of the set's outer boundary. Outer
//! boundaries and hole rings both come from here; only the solidity predicate
//! and the winding differ.

use std::collections::BTreeSet;

use log::warn;

use crate::edge::Direction;
use crate::error::{Error, Result};
use crate::grid_cell::GridCell;
use crate::point::Corner;

/// Orientation of an output ring, with +z pointing down the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Solid boundary
    Clockwise,
    /// Hole boundary
    CounterClockwise,
}

/// Output of one boundary trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Cell the trace started from
    pub start: GridCell,
    /// Corners in ring order, first corner is the start cell's minimum corner
    pub corners: Vec<Corner>,
    /// False when the step cap was hit; `corners` is then a partial walk
    pub closed: bool,
    /// Step cap the trace ran under
    pub limit: usize,
}

impl Trace {
    /// The finished ring, or an error when the trace never closed
    pub fn into_ring(self) -> Result<Vec<Corner>> {
        if !self.closed {
            return Err(Error::UnterminatedTrace { start: self.start, limit: self.limit });
        }
        if self.corners.is_empty() {
            return Err(Error::EmptyRing);
        }
        Ok(self.corners)
    }
}

/// The corner ahead and to the left of `cell` when facing `direction`
fn front_left(cell: GridCell, direction: Direction) -> Corner {
    match direction {
        Direction::PlusX => Corner::new(cell.x + 1, cell.z),
        Direction::PlusZ => Corner::new(cell.x + 1, cell.z + 1),
        Direction::MinusX => Corner::new(cell.x, cell.z + 1),
        Direction::MinusZ => Corner::of_cell(cell),
    }
}

/// Trace the outline of the solid set containing `start`
///
/// `start` must be the lexicographically smallest solid cell of its
/// component; that guarantees the cells to its west and north are open, so the
/// walk can begin facing +x along its northern edge.
///
/// At each step, in priority order:
/// - the cell ahead is open: turn right (corner);
/// - the cell ahead is solid, the one ahead-left is open: move straight;
/// - both are solid: move to the ahead-left cell and turn left (corner).
///
/// The walk ends when both position and facing equal the start state. If
/// `limit` steps pass first, a warning is logged and the partial walk is
/// returned with `closed == false`.
///
/// # Arguments
///
/// * `start` - Minimum cell of the set to trace
/// * `is_solid` - Membership predicate of the set
/// * `winding` - Output orientation
/// * `limit` - Maximum number of steps
pub fn trace_boundary<F>(start: GridCell, is_solid: F, winding: Winding, limit: usize) -> Trace
where
    F: Fn(GridCell) -> bool,
{
    let mut cell = start;
    let mut direction = Direction::PlusX;
    let mut corners = Vec::new();
    let mut steps = 0usize;

    loop {
        if steps >= limit {
            warn!(
                "boundary trace from ({}, {}) exceeded {} steps, returning {} partial corners",
                start.x,
                start.z,
                limit,
                corners.len()
            );
            return Trace { start, corners, closed: false, limit };
        }
        steps += 1;

        let ahead = cell.step(direction);
        if !is_solid(ahead) {
            corners.push(front_left(cell, direction));
            direction = direction.turn_right();
        } else {
            let ahead_left = ahead.step(direction.turn_left());
            if !is_solid(ahead_left) {
                cell = ahead;
            } else {
                corners.push(front_left(cell, direction));
                cell = ahead_left;
                direction = direction.turn_left();
            }
        }

        if cell == start && direction == Direction::PlusX {
            break;
        }
    }

    // Re-entering the start state is always a right turn out of MinusZ, which
    // emits the start cell's minimum corner last.
    corners.rotate_right(1);

    if winding == Winding::CounterClockwise && corners.len() > 1 {
        corners[1..].reverse();
    }

    Trace { start, corners, closed: true, limit }
}

/// Trace the outline of a cell set, starting from its minimum cell
///
/// Returns `None` for an empty set.
pub fn trace_cells(cells: &BTreeSet<GridCell>, winding: Winding, limit: usize) -> Option<Trace> {
    let start = *cells.first()?;
    Some(trace_boundary(start, |cell| cells.contains(&cell), winding, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> BTreeSet<GridCell> {
        coords.iter().copied().map(GridCell::from).collect()
    }

    fn corners(coords: &[(i32, i32)]) -> Vec<Corner> {
        coords.iter().copied().map(Corner::from).collect()
    }

    #[test]
    fn test_single_cell() {
        let trace = trace_cells(&cells(&[(4, -2)]), Winding::Clockwise, 100).unwrap();
        assert!(trace.closed);
        assert_eq!(trace.corners, corners(&[(4, -2), (5, -2), (5, -1), (4, -1)]));
    }

    #[test]
    fn test_two_by_two() {
        let trace = trace_cells(&cells(&[(0, 0), (1, 0), (0, 1), (1, 1)]), Winding::Clockwise, 100).unwrap();
        assert_eq!(trace.corners, corners(&[(0, 0), (2, 0), (2, 2), (0, 2)]));
    }

    #[test]
    fn test_l_shape() {
        let trace = trace_cells(&cells(&[(0, 0), (0, 1), (1, 1)]), Winding::Clockwise, 100).unwrap();
        assert_eq!(trace.corners, corners(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (0, 2)]));
    }

    #[test]
    fn test_counter_clockwise_keeps_first_corner() {
        let trace = trace_cells(&cells(&[(1, 1)]), Winding::CounterClockwise, 100).unwrap();
        assert_eq!(trace.corners, corners(&[(1, 1), (1, 2), (2, 2), (2, 1)]));
    }

    #[test]
    fn test_limit_returns_partial() {
        let trace = trace_cells(&cells(&[(0, 0), (1, 0), (2, 0)]), Winding::Clockwise, 2).unwrap();
        assert!(!trace.closed);
        assert!(trace.corners.len() <= 2);

        let err = trace.into_ring().unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(trace_cells(&BTreeSet::new(), Winding::Clockwise, 10), None);
    }
}
