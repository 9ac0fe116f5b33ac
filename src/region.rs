//! Connected-component extraction over sets of grid cells
//!
//! An owner's claims are split into maximal 4-connected regions, each of which
//! becomes its own polygon. The same flood fill with 8-connectivity is used by
//! hole detection to decide whether a void escapes to the outside.

use std::collections::BTreeSet;

use crate::grid_cell::{Connectivity, GridCell};

/// Split `cells` into maximal connected components
///
/// Iterative flood fill: cells are removed from a working set as they are
/// assigned, so each cell lands in exactly one component and the work done is
/// proportional to the number of cells. Components come out ordered by their
/// minimum cell.
///
/// # Arguments
///
/// * `cells` - Cells to partition (not modified)
/// * `connectivity` - Whether diagonal contact joins two cells
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use territory_polygons::{connected_components, Connectivity, GridCell};
///
/// let cells: BTreeSet<GridCell> = [(0, 0), (1, 1)].into_iter().map(GridCell::from).collect();
///
/// assert_eq!(connected_components(&cells, Connectivity::Four).len(), 2);
/// assert_eq!(connected_components(&cells, Connectivity::Eight).len(), 1);
/// ```
pub fn connected_components(cells: &BTreeSet<GridCell>, connectivity: Connectivity) -> Vec<BTreeSet<GridCell>> {
    let mut remaining = cells.clone();
    let mut components = Vec::new();
    let mut stack = Vec::new();

    while let Some(seed) = remaining.pop_first() {
        let mut component = BTreeSet::new();
        component.insert(seed);
        stack.push(seed);

        while let Some(cell) = stack.pop() {
            for neighbor in cell.neighbors(connectivity) {
                if remaining.remove(&neighbor) {
                    component.insert(neighbor);
                    stack.push(neighbor);
                }
            }
        }

        components.push(component);
    }

    components
}

/// Split one owner's cells into 4-connected regions
pub fn extract_regions(cells: &BTreeSet<GridCell>) -> Vec<BTreeSet<GridCell>> {
    connected_components(cells, Connectivity::Four)
}
