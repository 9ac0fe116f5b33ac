//! Marker diffing between two refreshes
//!
//! The renderer's API is slow and single-threaded, so the consumer only
//! touches markers whose polygon or display data actually changed. Output is
//! reproducible for unchanged claims, which makes plain equality enough.

use std::collections::BTreeMap;

use crate::assembler::{ClaimPolygon, TerritoryMap};

/// Marker ids classified by what the renderer has to do with them
///
/// Every list is sorted by marker id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub removed: Vec<String>,
}

impl MarkerDiff {
    /// Compare the markers currently rendered with a fresh result
    ///
    /// # Example
    ///
    /// ```
    /// use territory_polygons::{assemble, ClaimSnapshot, DisplayMeta, GridCell, MarkerDiff, TerritoryMap};
    ///
    /// let mut snapshot = ClaimSnapshot::new();
    /// snapshot.insert("overworld", "red", GridCell::new(0, 0));
    /// let map = assemble(&snapshot, |_, _| DisplayMeta::default());
    ///
    /// let diff = MarkerDiff::between(&TerritoryMap::default(), &map);
    /// assert_eq!(diff.created, vec!["territory_overworld__red__0".to_string()]);
    ///
    /// let diff = MarkerDiff::between(&map, &map);
    /// assert!(diff.is_noop());
    /// ```
    pub fn between(previous: &TerritoryMap, next: &TerritoryMap) -> Self {
        let before = by_id(previous);
        let after = by_id(next);
        let mut diff = Self::default();

        for (id, polygon) in &after {
            match before.get(id) {
                None => diff.created.push(id.to_string()),
                Some(old) if *old == *polygon => diff.unchanged.push(id.to_string()),
                Some(_) => diff.updated.push(id.to_string()),
            }
        }

        diff.removed = before
            .keys()
            .filter(|id| !after.contains_key(*id))
            .map(|id| id.to_string())
            .collect();

        diff
    }

    /// True when nothing has to be sent to the renderer
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

fn by_id(map: &TerritoryMap) -> BTreeMap<&str, &ClaimPolygon> {
    map.polygons.iter().map(|p| (p.marker_id.as_str(), p)).collect()
}
