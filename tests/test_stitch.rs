use std::collections::{BTreeMap, BTreeSet};

use territory_polygons::{polygonize_region, signed_area2, Corner, ExtractConfig, GridCell};

/// Helper function to build a solid `w` x `h` block at the origin minus some cells
fn block_minus(w: i32, h: i32, removed: &[(i32, i32)]) -> BTreeSet<GridCell> {
    let removed: BTreeSet<GridCell> = removed.iter().copied().map(GridCell::from).collect();
    (0..w)
        .flat_map(|x| (0..h).map(move |z| GridCell::new(x, z)))
        .filter(|cell| !removed.contains(cell))
        .collect()
}

fn ring(coords: &[(i32, i32)]) -> Vec<Corner> {
    coords.iter().copied().map(Corner::from).collect()
}

/// How often each corner appears in a ring
fn occurrences(corners: &[Corner]) -> BTreeMap<Corner, usize> {
    let mut counts = BTreeMap::new();
    for corner in corners {
        *counts.entry(*corner).or_insert(0) += 1;
    }
    counts
}

fn assert_axis_aligned(corners: &[Corner]) {
    let n = corners.len();
    for i in 0..n {
        let a = corners[i];
        let b = corners[(i + 1) % n];
        assert!(a.x == b.x || a.z == b.z, "segment {a:?} -> {b:?} is diagonal");
    }
}

#[test]
fn test_single_hole_one_cutout() {
    let region = block_minus(3, 3, &[(1, 1)]);
    let shape = polygonize_region(&region, &ExtractConfig::default()).unwrap();

    assert_eq!(shape.outer, ring(&[(0, 0), (3, 0), (3, 3), (0, 3)]));
    assert_eq!(
        shape.ring,
        ring(&[(0, 0), (3, 0), (3, 3), (0, 3), (0, 1), (1, 1), (1, 2), (2, 2), (2, 1), (1, 1), (0, 1)])
    );

    // Exactly one entry/exit pair is doubled: the landing point and the entry corner
    let doubled: Vec<Corner> = occurrences(&shape.ring)
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(corner, _)| corner)
        .collect();
    assert_eq!(doubled, ring(&[(0, 1), (1, 1)]));
}

#[test]
fn test_diagonal_cluster_uses_one_cutout() {
    let region = block_minus(4, 4, &[(1, 1), (2, 2)]);
    let shape = polygonize_region(&region, &ExtractConfig::default()).unwrap();

    assert_eq!(
        shape.ring,
        ring(&[
            (0, 0),
            (4, 0),
            (4, 4),
            (0, 4),
            (0, 1),
            (1, 1),
            (1, 2),
            (2, 2),
            (2, 3),
            (3, 3),
            (3, 2),
            (2, 2),
            (2, 1),
            (1, 1),
            (0, 1),
        ])
    );

    // Only one point on the outer boundary is used as a landing point
    let on_outer_edge = |c: &Corner| c.x == 0 || c.x == 4 || c.z == 0 || c.z == 4;
    let landings: Vec<&Corner> = shape.ring.iter().filter(|c| on_outer_edge(*c) && !shape.outer.contains(*c)).collect();
    assert_eq!(landings, vec![&Corner::new(0, 1), &Corner::new(0, 1)]);
}

#[test]
fn test_cutout_lands_mid_edge_on_nearest_side() {
    let region = block_minus(5, 5, &[(2, 2), (3, 2)]);
    let shape = polygonize_region(&region, &ExtractConfig::default()).unwrap();

    assert_eq!(
        shape.ring,
        ring(&[(0, 0), (5, 0), (5, 3), (4, 3), (4, 2), (2, 2), (2, 3), (4, 3), (5, 3), (5, 5), (0, 5)])
    );
}

#[test]
fn test_stitched_area_equals_cell_count() {
    let cases: [&[(i32, i32)]; 4] = [
        &[(1, 1)],
        &[(1, 1), (2, 2)],
        &[(1, 1), (3, 1), (1, 3), (3, 3)],
        &[(1, 1), (2, 2), (3, 3), (5, 1), (5, 2)],
    ];

    for removed in cases {
        let region = block_minus(7, 7, removed);
        let shape = polygonize_region(&region, &ExtractConfig::default()).unwrap();

        assert_eq!(signed_area2(&shape.ring), 2 * region.len() as i64, "removed {removed:?}");
        assert_axis_aligned(&shape.ring);
    }
}

#[test]
fn test_every_hole_corner_is_in_ring() {
    let region = block_minus(7, 7, &[(1, 1), (2, 2), (3, 3), (5, 1), (5, 2), (1, 5)]);
    let shape = polygonize_region(&region, &ExtractConfig::default()).unwrap();

    assert_eq!(shape.holes.len(), 5);
    for hole in &shape.holes {
        for corner in hole {
            assert!(shape.ring.contains(corner), "hole corner {corner:?} missing from ring");
        }
    }
}
