//! Output assembly: every owner's regions, in every world, as map polygons
//!
//! Each region runs the full pipeline (trace, holes, clusters, stitch)
//! independently, so regions are fanned out over rayon's pool. Results are
//! collected in input order, which keeps repeated runs on the same snapshot
//! identical point for point.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};
use log::{debug, error, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cluster::cluster_holes;
use crate::config::ExtractConfig;
use crate::error::{Error, Result};
use crate::grid_cell::GridCell;
use crate::holes::detect_holes;
use crate::point::Corner;
use crate::region::extract_regions;
use crate::stitch::stitch;
use crate::tracer::{trace_cells, Trace, Winding};

/// Read-only view of who claims what, grouped by world then owner
///
/// # Example
///
/// ```
/// use territory_polygons::{ClaimSnapshot, GridCell};
///
/// let mut snapshot = ClaimSnapshot::new();
/// snapshot.insert("overworld", "red", GridCell::new(0, 0));
/// snapshot.insert("overworld", "red", GridCell::new(1, 0));
///
/// assert_eq!(snapshot.cells("overworld", "red").map(|c| c.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSnapshot {
    worlds: BTreeMap<String, BTreeMap<String, BTreeSet<GridCell>>>,
}

impl ClaimSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one claimed cell
    pub fn insert(&mut self, world: &str, owner: &str, cell: GridCell) {
        self.worlds
            .entry(world.to_string())
            .or_default()
            .entry(owner.to_string())
            .or_default()
            .insert(cell);
    }

    /// Record a batch of claimed cells for one owner
    pub fn insert_cells<I>(&mut self, world: &str, owner: &str, cells: I)
    where
        I: IntoIterator<Item = GridCell>,
    {
        self.worlds
            .entry(world.to_string())
            .or_default()
            .entry(owner.to_string())
            .or_default()
            .extend(cells);
    }

    pub fn cells(&self, world: &str, owner: &str) -> Option<&BTreeSet<GridCell>> {
        self.worlds.get(world)?.get(owner)
    }

    /// `(world, owner, cells)` for every owner with at least one cell
    pub fn owners(&self) -> impl Iterator<Item = (&str, &str, &BTreeSet<GridCell>)> {
        self.worlds.iter().flat_map(|(world, owners)| {
            owners
                .iter()
                .filter(|(_, cells)| !cells.is_empty())
                .map(move |(owner, cells)| (world.as_str(), owner.as_str(), cells))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.owners().next().is_none()
    }
}

/// Caller-supplied display data, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayMeta {
    pub label: String,
    pub description: String,
    /// Renderer-specific style (colours, opacity, ...)
    pub style: JsonObject,
}

/// The shape of one region at each pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionShape {
    /// Clockwise outer boundary
    pub outer: Vec<Corner>,
    /// Counter-clockwise hole rings
    pub holes: Vec<Vec<Corner>>,
    /// Hole indices grouped by shared corners
    pub clusters: Vec<Vec<usize>>,
    /// Final single ring with cutouts applied
    pub ring: Vec<Corner>,
}

/// Run the full pipeline on one 4-connected region
///
/// An unterminated trace (outer or hole) fails the whole region; the caller
/// decides whether to skip it.
pub fn polygonize_region(region: &BTreeSet<GridCell>, config: &ExtractConfig) -> Result<RegionShape> {
    let limit = config.trace_limit(region.len());
    let outer = match trace_cells(region, Winding::Clockwise, limit) {
        Some(trace) => trace.into_ring()?,
        None => return Err(Error::EmptyRing),
    };

    let holes = detect_holes(region, config)
        .into_iter()
        .map(Trace::into_ring)
        .collect::<Result<Vec<_>>>()?;

    let clusters = cluster_holes(&holes);
    let ring = stitch(&outer, &holes, &clusters)?;

    Ok(RegionShape { outer, holes, clusters, ring })
}

/// Stable marker id for the `index`-th region of `owner` in `world`
pub fn marker_id(prefix: &str, world: &str, owner: &str, index: usize) -> String {
    format!("{prefix}_{world}__{owner}__{index}")
}

/// One polygon ready for the map renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimPolygon {
    pub world: String,
    pub owner: String,
    /// Position of the region in the owner's region list for this run
    pub index: usize,
    pub marker_id: String,
    /// Closed clockwise ring, cutouts applied
    pub corners: Vec<Corner>,
    pub display: DisplayMeta,
}

impl ClaimPolygon {
    /// Convert to a GeoJSON Feature with a single-ring Polygon geometry
    ///
    /// # Arguments
    ///
    /// * `close_ring` - Repeat the first position at the end, as GeoJSON
    ///   linear rings require
    pub fn to_feature(&self, close_ring: bool) -> Feature {
        let mut ring: Vec<geojson::Position> = self.corners.iter().map(|c| c.to_position()).collect();
        if close_ring {
            if let Some(first) = self.corners.first() {
                ring.push(first.to_position());
            }
        }

        let mut properties = JsonObject::new();
        properties.insert("world".to_string(), serde_json::json!(self.world));
        properties.insert("owner".to_string(), serde_json::json!(self.owner));
        properties.insert("index".to_string(), serde_json::json!(self.index));
        properties.insert("label".to_string(), serde_json::json!(self.display.label));
        properties.insert("description".to_string(), serde_json::json!(self.display.description));
        properties.insert("style".to_string(), serde_json::Value::Object(self.display.style.clone()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoValue::Polygon(vec![ring]))),
            id: Some(geojson::feature::Id::String(self.marker_id.clone())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// All polygons of one refresh, ordered by world, owner, then index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerritoryMap {
    pub polygons: Vec<ClaimPolygon>,
}

impl TerritoryMap {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Polygons of one owner in one world
    pub fn for_owner<'a>(&'a self, world: &'a str, owner: &'a str) -> impl Iterator<Item = &'a ClaimPolygon> + 'a {
        self.polygons.iter().filter(move |p| p.world == world && p.owner == owner)
    }

    pub fn get(&self, marker_id: &str) -> Option<&ClaimPolygon> {
        self.polygons.iter().find(|p| p.marker_id == marker_id)
    }

    /// Export as a GeoJSON FeatureCollection, one Feature per polygon
    ///
    /// Rings are closed when `config.close_rings` is set.
    pub fn to_feature_collection(&self, config: &ExtractConfig) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.polygons.iter().map(|p| p.to_feature(config.close_rings)).collect(),
            foreign_members: None,
        }
    }
}

/// One region waiting for the pipeline
struct RegionJob<'a> {
    world: &'a str,
    owner: &'a str,
    index: usize,
    cells: BTreeSet<GridCell>,
    display: &'a DisplayMeta,
}

/// Split one owner's cells into indexed region jobs
fn owner_jobs<'a>(world: &'a str, owner: &'a str, cells: &BTreeSet<GridCell>, display: &'a DisplayMeta) -> Vec<RegionJob<'a>> {
    extract_regions(cells)
        .into_iter()
        .enumerate()
        .map(|(index, cells)| RegionJob { world, owner, index, cells, display })
        .collect()
}

fn run_job(job: &RegionJob<'_>, config: &ExtractConfig) -> Option<ClaimPolygon> {
    match polygonize_region(&job.cells, config) {
        Ok(shape) => Some(ClaimPolygon {
            world: job.world.to_string(),
            owner: job.owner.to_string(),
            index: job.index,
            marker_id: marker_id(&config.marker_prefix, job.world, job.owner, job.index),
            corners: shape.ring,
            display: job.display.clone(),
        }),
        Err(err) => {
            if err.is_recoverable() {
                warn!("skipping region {} of '{}' in '{}' this cycle: {}", job.index, job.owner, job.world, err);
            } else {
                error!("invalid polygon state for region {} of '{}' in '{}': {}", job.index, job.owner, job.world, err);
            }
            debug_assert!(err.is_recoverable(), "invalid polygon state: {err}");
            None
        }
    }
}

/// Build map polygons for every owner in the snapshot
///
/// Uses `ExtractConfig::default()`. See [`assemble_with_config`].
///
/// # Example
///
/// ```
/// use territory_polygons::{assemble, ClaimSnapshot, DisplayMeta, GridCell};
///
/// let mut snapshot = ClaimSnapshot::new();
/// snapshot.insert_cells("overworld", "red", [GridCell::new(0, 0), GridCell::new(1, 0)]);
///
/// let map = assemble(&snapshot, |_world, owner| DisplayMeta {
///     label: owner.to_string(),
///     ..DisplayMeta::default()
/// });
///
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.polygons[0].corners.len(), 4);
/// ```
pub fn assemble<F>(snapshot: &ClaimSnapshot, display: F) -> TerritoryMap
where
    F: Fn(&str, &str) -> DisplayMeta,
{
    assemble_with_config(snapshot, display, &ExtractConfig::default())
}

/// Build map polygons for every owner in the snapshot
///
/// # Arguments
///
/// * `snapshot` - Claimed cells per world and owner
/// * `display` - Display metadata for a `(world, owner)` pair, called once per owner
/// * `config` - Trace caps, parallelism and marker naming
///
/// # Returns
///
/// Every polygon of every owner. A region whose trace does not terminate is
/// logged and left out; the rest of the map is unaffected.
///
/// # Panics
///
/// In debug builds, on broken internal state (a hole cluster with no cutout or
/// an empty ring). Release builds log the error and skip the region.
pub fn assemble_with_config<F>(snapshot: &ClaimSnapshot, display: F, config: &ExtractConfig) -> TerritoryMap
where
    F: Fn(&str, &str) -> DisplayMeta,
{
    let start = Instant::now();

    let owners: Vec<(&str, &str, &BTreeSet<GridCell>, DisplayMeta)> = snapshot
        .owners()
        .map(|(world, owner, cells)| (world, owner, cells, display(world, owner)))
        .collect();

    let per_owner: Vec<Vec<RegionJob<'_>>> = if config.parallel {
        owners
            .par_iter()
            .map(|(world, owner, cells, meta)| owner_jobs(world, owner, cells, meta))
            .collect()
    } else {
        owners
            .iter()
            .map(|(world, owner, cells, meta)| owner_jobs(world, owner, cells, meta))
            .collect()
    };
    let jobs: Vec<RegionJob<'_>> = per_owner.into_iter().flatten().collect();

    let extract_elapsed = start.elapsed();
    debug!("extracted {} regions from {} owners in {:?}", jobs.len(), owners.len(), extract_elapsed);

    let traced: Vec<Option<ClaimPolygon>> = if config.parallel {
        jobs.par_iter().map(|job| run_job(job, config)).collect()
    } else {
        jobs.iter().map(|job| run_job(job, config)).collect()
    };

    let polygons: Vec<ClaimPolygon> = traced.into_iter().flatten().collect();
    let skipped = jobs.len() - polygons.len();

    debug!(
        "assembled {} polygons ({} regions skipped) in {:?}",
        polygons.len(),
        skipped,
        start.elapsed()
    );

    TerritoryMap { polygons }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_id_format() {
        assert_eq!(marker_id("territory", "nether", "blue", 2), "territory_nether__blue__2");
    }

    #[test]
    fn test_snapshot_skips_empty_owners() {
        let mut snapshot = ClaimSnapshot::new();
        snapshot.insert_cells("overworld", "ghost", Vec::new());
        assert!(snapshot.is_empty());

        snapshot.insert("overworld", "red", GridCell::new(0, 0));
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.owners().count(), 1);
    }

    #[test]
    fn test_polygonize_region_without_holes() {
        let region: BTreeSet<GridCell> = [(0, 0), (1, 0)].into_iter().map(GridCell::from).collect();
        let shape = polygonize_region(&region, &ExtractConfig::default()).unwrap();

        assert!(shape.holes.is_empty());
        assert!(shape.clusters.is_empty());
        assert_eq!(shape.ring, shape.outer);
    }

    #[test]
    fn test_polygonize_empty_region_is_invalid() {
        let err = polygonize_region(&BTreeSet::new(), &ExtractConfig::default()).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_to_feature_closes_ring() {
        let polygon = ClaimPolygon {
            world: "w".to_string(),
            owner: "o".to_string(),
            index: 0,
            marker_id: marker_id("territory", "w", "o", 0),
            corners: vec![Corner::new(0, 0), Corner::new(1, 0), Corner::new(1, 1), Corner::new(0, 1)],
            display: DisplayMeta::default(),
        };

        let feature = polygon.to_feature(true);
        match &feature.geometry.as_ref().unwrap().value {
            GeoValue::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0].first(), rings[0].last());
            }
            _ => panic!("Expected Polygon geometry"),
        }
        assert_eq!(feature.id, Some(geojson::feature::Id::String("territory_w__o__0".to_string())));
    }
}
