//! Grid cell (chunk) coordinates and neighbourhood helpers
//!
//! Territory is claimed in whole cells. A cell is addressed by the integer
//! pair `(x, z)`; ordering is lexicographic on `(x, z)` so that ordered
//! collections of cells iterate the same way on every refresh.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::edge::Direction;

/// Neighbourhood used when flood filling cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Shared edge only
    Four,
    /// Shared edge or shared corner
    Eight,
}

/// One claimable grid cell
///
/// # Example
///
/// ```
/// use territory_polygons::GridCell;
///
/// let cell = GridCell::new(3, -2);
/// assert_eq!(cell.x, 3);
/// assert_eq!(cell.z, -2);
/// assert!(GridCell::new(0, 5) < GridCell::new(1, -5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    /// Column (east is +x)
    pub x: i32,

    /// Row (south is +z)
    pub z: i32,
}

impl GridCell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell one step away in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self::new(self.x + dx, self.z + dz)
    }

    /// Cells adjacent to this one under the given connectivity
    ///
    /// Edge neighbours come first (+x, -x, +z, -z), then the diagonals.
    pub fn neighbors(self, connectivity: Connectivity) -> ArrayVec<GridCell, 8> {
        let mut out = ArrayVec::new();
        out.push(Self::new(self.x + 1, self.z));
        out.push(Self::new(self.x - 1, self.z));
        out.push(Self::new(self.x, self.z + 1));
        out.push(Self::new(self.x, self.z - 1));

        if connectivity == Connectivity::Eight {
            out.push(Self::new(self.x + 1, self.z + 1));
            out.push(Self::new(self.x + 1, self.z - 1));
            out.push(Self::new(self.x - 1, self.z + 1));
            out.push(Self::new(self.x - 1, self.z - 1));
        }

        out
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

/// Inclusive cell bounds of a set of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl BBox {
    /// Compute the bounds of `cells`, `None` when there are no cells
    pub fn from_cells<'a, I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GridCell>,
    {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_x: first.x,
            max_x: first.x,
            min_z: first.z,
            max_z: first.z,
        };

        for cell in iter {
            bbox.min_x = bbox.min_x.min(cell.x);
            bbox.max_x = bbox.max_x.max(cell.x);
            bbox.min_z = bbox.min_z.min(cell.z);
            bbox.max_z = bbox.max_z.max(cell.z);
        }

        Some(bbox)
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.x >= self.min_x && cell.x <= self.max_x && cell.z >= self.min_z && cell.z <= self.max_z
    }

    /// True if `cell` lies in the outermost ring of the box
    pub fn on_edge(&self, cell: GridCell) -> bool {
        cell.x == self.min_x || cell.x == self.max_x || cell.z == self.min_z || cell.z == self.max_z
    }

    /// All cells of the box in `(x, z)` order
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (self.min_x..=self.max_x).flat_map(move |x| (self.min_z..=self.max_z).map(move |z| GridCell::new(x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_grid_cell_ordering_is_lexicographic() {
        let mut cells: BTreeSet<GridCell> = [(1, 0), (0, 3), (0, -1), (-2, 9)]
            .into_iter()
            .map(GridCell::from)
            .collect();

        assert_eq!(cells.pop_first(), Some(GridCell::new(-2, 9)));
        assert_eq!(cells.pop_first(), Some(GridCell::new(0, -1)));
        assert_eq!(cells.pop_first(), Some(GridCell::new(0, 3)));
        assert_eq!(cells.pop_first(), Some(GridCell::new(1, 0)));
    }

    #[test]
    fn test_neighbor_counts() {
        let cell = GridCell::new(0, 0);
        assert_eq!(cell.neighbors(Connectivity::Four).len(), 4);
        assert_eq!(cell.neighbors(Connectivity::Eight).len(), 8);
        assert!(!cell.neighbors(Connectivity::Four).contains(&GridCell::new(1, 1)));
        assert!(cell.neighbors(Connectivity::Eight).contains(&GridCell::new(1, 1)));
    }

    #[test]
    fn test_bbox_from_cells() {
        let cells = [GridCell::new(2, 5), GridCell::new(-1, 7), GridCell::new(0, 4)];
        let bbox = BBox::from_cells(&cells).unwrap();

        assert_eq!(bbox, BBox { min_x: -1, max_x: 2, min_z: 4, max_z: 7 });
        assert!(bbox.on_edge(GridCell::new(-1, 5)));
        assert!(!bbox.on_edge(GridCell::new(0, 5)));
        assert!(!bbox.contains(GridCell::new(3, 5)));
        assert_eq!(bbox.cells().count(), 16);
    }

    #[test]
    fn test_bbox_empty() {
        let cells: Vec<GridCell> = Vec::new();
        assert_eq!(BBox::from_cells(&cells), None);
    }
}
