//! Cutout stitching: one ring out of an outer boundary and its holes
//!
//! The map renderer only draws single-ring polygons, so each hole cluster is
//! joined to the outer boundary by a zero-area slit. The outer walk runs up
//! the slit, around every hole of the cluster, and back down the same slit.

use crate::cluster::CornerIndex;
use crate::edge::{ring_edges, Direction};
use crate::error::{Error, Result};
use crate::point::Corner;

/// Where a hole cluster is joined to the outer boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutout {
    /// Index of the cluster this cutout serves
    pub cluster: usize,
    /// Hole the slit enters
    pub hole: usize,
    /// Index of the entry corner in that hole's ring
    pub corner: usize,
    /// Outer edge the slit lands on, `outer[edge] -> outer[edge + 1]`
    pub edge: usize,
    /// Landing point on the outer boundary
    pub point: Corner,
    /// Slit length
    pub distance: i32,
}

/// Shortest axis-aligned slit from any corner of the cluster to the outer ring
///
/// Holes are scanned in cluster order, corners in ring order, rays in
/// `Direction::ALL` order, outer edges in ring order; the first of several
/// equally short slits wins. A landing point on an edge's end corner is
/// attributed to the following edge, so corner landings sort at offset zero.
pub fn find_cutout(outer: &[Corner], holes: &[Vec<Corner>], cluster: &[usize], cluster_idx: usize) -> Option<Cutout> {
    let n = outer.len();
    let mut best: Option<Cutout> = None;

    for &hole_idx in cluster {
        for (corner_idx, &origin) in holes[hole_idx].iter().enumerate() {
            for direction in Direction::ALL {
                for (edge_idx, edge) in ring_edges(outer).enumerate() {
                    let Some((point, distance)) = edge.ray_hit(origin, direction) else {
                        continue;
                    };
                    if best.map_or(false, |b| distance >= b.distance) {
                        continue;
                    }
                    let edge_idx = if point == edge.end() { (edge_idx + 1) % n } else { edge_idx };
                    best = Some(Cutout {
                        cluster: cluster_idx,
                        hole: hole_idx,
                        corner: corner_idx,
                        edge: edge_idx,
                        point,
                        distance,
                    });
                }
            }
        }
    }

    best
}

/// One stack entry of the cluster walk
struct Frame {
    hole: usize,
    start: usize,
    step: usize,
}

/// Walk every hole of a cluster, beginning and ending at the entry corner
///
/// The entry hole is walked once around. Whenever the walk stands on a corner
/// shared with a hole it has not yet visited, that hole is walked first,
/// starting and ending on the shared corner, before the original walk carries
/// on. Uses an explicit stack; clusters can chain arbitrarily far.
fn walk_cluster(holes: &[Vec<Corner>], index: &CornerIndex, entry_hole: usize, entry_corner: usize) -> Vec<Corner> {
    let mut visited = vec![false; holes.len()];
    visited[entry_hole] = true;

    let mut path = Vec::new();
    let mut stack = vec![Frame { hole: entry_hole, start: entry_corner, step: 0 }];

    while let Some(frame) = stack.last_mut() {
        let ring = &holes[frame.hole];
        let n = ring.len();
        if frame.step > n {
            stack.pop();
            continue;
        }

        let corner = ring[(frame.start + frame.step) % n];
        frame.step += 1;
        path.push(corner);

        let next = index.uses(&corner).iter().find(|(hole, _)| !visited[*hole]).copied();
        if let Some((hole, start)) = next {
            visited[hole] = true;
            // The shared corner was just emitted, so the inlined hole starts one
            // step past it and its last step lands back on it.
            stack.push(Frame { hole, start, step: 1 });
        }
    }

    path
}

fn push_dedup(ring: &mut Vec<Corner>, corner: Corner) {
    if ring.last() != Some(&corner) {
        ring.push(corner);
    }
}

/// Splice hole clusters into the outer ring through cutouts
///
/// # Arguments
///
/// * `outer` - Clockwise outer boundary
/// * `holes` - Counter-clockwise hole rings
/// * `clusters` - Hole indices grouped by shared corners
///
/// # Returns
///
/// A single closed ring. Without holes this is `outer` unchanged.
pub fn stitch(outer: &[Corner], holes: &[Vec<Corner>], clusters: &[Vec<usize>]) -> Result<Vec<Corner>> {
    if outer.is_empty() || holes.iter().any(Vec::is_empty) {
        return Err(Error::EmptyRing);
    }
    if clusters.is_empty() {
        return Ok(outer.to_vec());
    }

    let mut cutouts = Vec::with_capacity(clusters.len());
    for (cluster_idx, cluster) in clusters.iter().enumerate() {
        let cutout = find_cutout(outer, holes, cluster, cluster_idx).ok_or(Error::MissingCutout { cluster: cluster_idx })?;
        cutouts.push(cutout);
    }
    cutouts.sort_by_key(|cut| (cut.edge, cut.point.manhattan(&outer[cut.edge]), cut.cluster));

    let index = CornerIndex::build(holes);
    let hole_corners: usize = holes.iter().map(Vec::len).sum();
    let mut ring = Vec::with_capacity(outer.len() + hole_corners + 4 * cutouts.len());
    let mut pending = cutouts.iter().peekable();

    for (i, &corner) in outer.iter().enumerate() {
        push_dedup(&mut ring, corner);

        while let Some(cut) = pending.next_if(|cut| cut.edge == i) {
            push_dedup(&mut ring, cut.point);
            ring.extend(walk_cluster(holes, &index, cut.hole, cut.corner));
            ring.push(cut.point);
        }
    }

    Ok(ring)
}
