//! Tuning knobs for polygon extraction
//!
//! Every field has a default, so a host can supply a partial JSON document
//! (or none at all).

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default multiplier on a traced set's cell count for the tracer's step cap
pub const DEFAULT_TRACE_LIMIT_FACTOR: usize = 4;

/// Default constant added to the tracer's step cap
pub const DEFAULT_TRACE_LIMIT_SLACK: usize = 16;

/// Default prefix for marker ids
pub const DEFAULT_MARKER_PREFIX: &str = "territory";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Step cap is `trace_limit_factor * cells + trace_limit_slack`
    pub trace_limit_factor: usize,
    pub trace_limit_slack: usize,
    /// Process regions on the rayon pool
    pub parallel: bool,
    /// First component of every marker id
    pub marker_prefix: String,
    /// Repeat the first position at the end of GeoJSON rings
    pub close_rings: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            trace_limit_factor: DEFAULT_TRACE_LIMIT_FACTOR,
            trace_limit_slack: DEFAULT_TRACE_LIMIT_SLACK,
            parallel: true,
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            close_rings: true,
        }
    }
}

impl ExtractConfig {
    /// Parse a JSON configuration document; missing fields take defaults
    ///
    /// # Example
    ///
    /// ```
    /// use territory_polygons::ExtractConfig;
    ///
    /// let config = ExtractConfig::from_json(r#"{ "parallel": false }"#).unwrap();
    /// assert!(!config.parallel);
    /// assert_eq!(config.trace_limit_factor, 4);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Step cap for tracing a set of `cells` cells
    pub fn trace_limit(&self, cells: usize) -> usize {
        cells.saturating_mul(self.trace_limit_factor).saturating_add(self.trace_limit_slack)
    }
}
