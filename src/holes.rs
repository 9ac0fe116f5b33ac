//! Hole detection inside a region's bounding box
//!
//! A void only counts as a hole if it cannot reach the outside. Escape is
//! judged with 8-connectivity, because a gap that touches the exterior only
//! diagonally is still open to it. Hole identity is then judged with
//! 4-connectivity, because two voids meeting at a single corner are traced as
//! two separate rings.

use std::collections::BTreeSet;

use log::debug;

use crate::config::ExtractConfig;
use crate::grid_cell::{BBox, Connectivity, GridCell};
use crate::region::connected_components;
use crate::tracer::{trace_cells, Trace, Winding};

/// Find the enclosed 4-connected voids of `region`, without tracing them
///
/// Holes come out ordered by their minimum cell.
pub fn find_hole_cells(region: &BTreeSet<GridCell>) -> Vec<BTreeSet<GridCell>> {
    let Some(bbox) = BBox::from_cells(region) else {
        return Vec::new();
    };

    let candidates: BTreeSet<GridCell> = bbox.cells().filter(|cell| !region.contains(cell)).collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut holes: Vec<BTreeSet<GridCell>> = connected_components(&candidates, Connectivity::Eight)
        .into_iter()
        .filter(|group| !group.iter().any(|cell| bbox.on_edge(*cell)))
        .flat_map(|group| connected_components(&group, Connectivity::Four))
        .collect();

    holes.sort_by_key(|hole| hole.first().copied());
    holes
}

/// Find and trace every hole of `region`, counter-clockwise
///
/// Each hole is traced with its own cells as the solid set, in the order of
/// [`find_hole_cells`]. A trace that hits the step cap is still returned,
/// flagged as not closed.
pub fn detect_holes(region: &BTreeSet<GridCell>, config: &ExtractConfig) -> Vec<Trace> {
    let holes: Vec<Trace> = find_hole_cells(region)
        .into_iter()
        .filter_map(|cells| trace_cells(&cells, Winding::CounterClockwise, config.trace_limit(cells.len())))
        .collect();

    if !holes.is_empty() {
        debug!("region of {} cells has {} holes", region.len(), holes.len());
    }

    holes
}
