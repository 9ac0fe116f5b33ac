//! Grouping of holes that touch at a corner
//!
//! Holes that share a corner can be reached through a single cutout: the walk
//! enters one hole and crosses into the next at the shared corner.

use std::collections::{BTreeMap, VecDeque};

use crate::point::Corner;

/// Every use of a corner across a set of hole rings
#[derive(Debug, Clone, Default)]
pub struct CornerIndex {
    uses: BTreeMap<Corner, Vec<(usize, usize)>>,
}

impl CornerIndex {
    /// Index `(hole index, corner index)` pairs by corner
    pub fn build(holes: &[Vec<Corner>]) -> Self {
        let mut uses: BTreeMap<Corner, Vec<(usize, usize)>> = BTreeMap::new();
        for (hole_idx, ring) in holes.iter().enumerate() {
            for (corner_idx, corner) in ring.iter().enumerate() {
                uses.entry(*corner).or_default().push((hole_idx, corner_idx));
            }
        }
        Self { uses }
    }

    /// All `(hole index, corner index)` pairs placed on `corner`
    pub fn uses(&self, corner: &Corner) -> &[(usize, usize)] {
        self.uses.get(corner).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Group holes transitively connected through shared corners
///
/// Returns clusters of hole indices. Clusters are ordered by their smallest
/// hole index and each cluster's indices are ascending; every hole appears in
/// exactly one cluster.
///
/// # Example
///
/// ```
/// use territory_polygons::{cluster_holes, Corner};
///
/// let square = |x: i32, z: i32| {
///     vec![Corner::new(x, z), Corner::new(x, z + 1), Corner::new(x + 1, z + 1), Corner::new(x + 1, z)]
/// };
/// // The first two touch at (2, 2), the third is apart
/// let holes = vec![square(1, 1), square(2, 2), square(5, 5)];
///
/// assert_eq!(cluster_holes(&holes), vec![vec![0, 1], vec![2]]);
/// ```
pub fn cluster_holes(holes: &[Vec<Corner>]) -> Vec<Vec<usize>> {
    let index = CornerIndex::build(holes);
    let mut assigned = vec![false; holes.len()];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..holes.len() {
        if assigned[seed] {
            continue;
        }

        assigned[seed] = true;
        queue.push_back(seed);
        let mut cluster = Vec::new();

        while let Some(hole_idx) = queue.pop_front() {
            cluster.push(hole_idx);
            for corner in &holes[hole_idx] {
                for &(other, _) in index.uses(corner) {
                    if !assigned[other] {
                        assigned[other] = true;
                        queue.push_back(other);
                    }
                }
            }
        }

        cluster.sort_unstable();
        clusters.push(cluster);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_hole(x: i32, z: i32) -> Vec<Corner> {
        vec![Corner::new(x, z), Corner::new(x, z + 1), Corner::new(x + 1, z + 1), Corner::new(x + 1, z)]
    }

    #[test]
    fn test_no_holes() {
        assert!(cluster_holes(&[]).is_empty());
    }

    #[test]
    fn test_separate_holes() {
        let holes = vec![unit_hole(1, 1), unit_hole(3, 1)];
        assert_eq!(cluster_holes(&holes), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_transitive_chain() {
        // 0 touches 2, 2 touches 1; 3 is apart
        let holes = vec![unit_hole(1, 1), unit_hole(3, 3), unit_hole(2, 2), unit_hole(8, 1)];
        assert_eq!(cluster_holes(&holes), vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn test_corner_index_uses() {
        let holes = vec![unit_hole(1, 1), unit_hole(2, 2)];
        let index = CornerIndex::build(&holes);

        assert_eq!(index.uses(&Corner::new(2, 2)), &[(0, 2), (1, 0)]);
        assert!(index.uses(&Corner::new(9, 9)).is_empty());
    }
}
