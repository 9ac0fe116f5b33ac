//! # territory-polygons
//!
//! Turns claimed grid cells ("chunks") into polygons for a 2D web-map overlay.
//!
//! Every owner's cells are split into 4-connected regions, and each region
//! becomes one closed ring of cell corners. The target renderers only draw
//! single-ring polygons, so holes are not emitted as separate rings: they are
//! stitched into the outer ring through zero-area cutouts.
//!
//! ## Pipeline
//!
//! Per region, in order:
//!
//! 1. **Extraction**: split an owner's cells into maximal 4-connected regions
//! 2. **Tracing**: wall-follow the region outline into a clockwise ring
//! 3. **Hole detection**: find enclosed voids (escape tested with
//!    8-connectivity, holes split with 4-connectivity), trace each
//!    counter-clockwise
//! 4. **Clustering**: group holes that touch at a corner
//! 5. **Stitching**: join each cluster to the outer ring with the shortest
//!    axis-aligned cutout
//! 6. **Assembly**: attach display metadata and a stable marker id
//!
//! Regions are independent and are processed in parallel with Rayon.
//!
//! ## Example
//!
//! ```rust
//! use territory_polygons::{assemble, ClaimSnapshot, Corner, DisplayMeta, GridCell};
//!
//! let mut snapshot = ClaimSnapshot::new();
//! for x in 0..3 {
//!     for z in 0..3 {
//!         if (x, z) != (1, 1) {
//!             snapshot.insert("overworld", "red", GridCell::new(x, z));
//!         }
//!     }
//! }
//!
//! let map = assemble(&snapshot, |world, owner| DisplayMeta {
//!     label: owner.to_string(),
//!     description: format!("{owner} in {world}"),
//!     ..DisplayMeta::default()
//! });
//!
//! // One ring: the outer square, a cutout, the hole, and back
//! let ring = &map.polygons[0].corners;
//! assert_eq!(ring[0], Corner::new(0, 0));
//! assert_eq!(ring.len(), 11);
//! ```
//!
//! ## Coordinates
//!
//! | Axis | Direction | Map |
//! |------|-----------|-----|
//! | +x | east | right |
//! | +z | south | down |
//!
//! Cell `(x, z)` spans corners `(x, z)` to `(x + 1, z + 1)`. Clockwise means
//! clockwise as drawn with +z pointing down.
//!
//! ## Determinism
//!
//! Cells are held in ordered sets and tracing always starts from a region's
//! minimum cell, so unchanged claims give identical output on every run. The
//! [`MarkerDiff`] helper relies on that to skip redundant renderer updates.

mod assembler;
mod cluster;
mod config;
mod diff;
mod edge;
mod error;
mod grid_cell;
mod handoff;
mod holes;
mod point;
mod region;
mod stitch;
mod tracer;

pub use assembler::{
    assemble,
    assemble_with_config,
    marker_id,
    polygonize_region,
    ClaimPolygon,
    ClaimSnapshot,
    DisplayMeta,
    RegionShape,
    TerritoryMap,
};
pub use cluster::{cluster_holes, CornerIndex};
pub use config::{ExtractConfig, DEFAULT_MARKER_PREFIX, DEFAULT_TRACE_LIMIT_FACTOR, DEFAULT_TRACE_LIMIT_SLACK};
pub use diff::MarkerDiff;
pub use edge::{Direction, Edge};
pub use error::{Error, Result};
pub use grid_cell::{BBox, Connectivity, GridCell};
pub use handoff::LatestResult;
pub use holes::{detect_holes, find_hole_cells};
pub use point::{signed_area2, Corner};
pub use region::{connected_components, extract_regions};
pub use stitch::{find_cutout, stitch, Cutout};
pub use tracer::{trace_boundary, trace_cells, Trace, Winding};
