use serde::{Deserialize, Serialize};

use crate::grid_cell::GridCell;

/// A lattice point on cell corners
///
/// Cell `(x, z)` spans corners `(x, z)` through `(x + 1, z + 1)`. Polygons are
/// rings of corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Corner {
    pub x: i32,
    pub z: i32,
}

impl Corner {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The minimum (north-west) corner of a cell
    pub fn of_cell(cell: GridCell) -> Self {
        Self::new(cell.x, cell.z)
    }

    /// Manhattan distance, which is the exact length along an axis-aligned edge
    pub fn manhattan(&self, other: &Corner) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }

    /// Convert to a GeoJSON position `[x, z]`
    pub fn to_position(self) -> geojson::Position {
        vec![self.x as f64, self.z as f64]
    }
}

impl From<(i32, i32)> for Corner {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

/// Twice the signed area of a ring
///
/// Positive for clockwise rings on a map where +z points down (south), which
/// is how the renderer draws them.
pub fn signed_area2(ring: &[Corner]) -> i64 {
    let n = ring.len();
    let mut area = 0i64;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        area += a.x as i64 * b.z as i64 - b.x as i64 * a.z as i64;
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_corner_of_cell() {
        let corner = Corner::of_cell(GridCell::new(-4, 7));
        assert_eq!(corner, Corner::new(-4, 7));
    }

    #[test]
    fn test_corner_in_hashmap() {
        let mut map = HashMap::new();
        map.insert(Corner::new(5, 10), "value1");
        map.insert(Corner::new(5, 10), "value2");

        // Should overwrite since the corners are equal
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Corner::new(5, 10)), Some(&"value2"));
    }

    #[test]
    fn test_signed_area_orientation() {
        let clockwise = [Corner::new(0, 0), Corner::new(2, 0), Corner::new(2, 2), Corner::new(0, 2)];
        let counter: Vec<Corner> = clockwise.iter().rev().copied().collect();

        assert_eq!(signed_area2(&clockwise), 8);
        assert_eq!(signed_area2(&counter), -8);
    }

    #[test]
    fn test_to_position() {
        assert_eq!(Corner::new(3, -1).to_position(), vec![3.0, -1.0]);
    }
}
