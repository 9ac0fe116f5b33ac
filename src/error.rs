use core::fmt;

use crate::grid_cell::GridCell;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while turning one region into a polygon
#[derive(Debug)]
pub enum Error {
    /// The boundary tracer hit its iteration cap without returning to its
    /// start state. The region is skipped for this refresh.
    UnterminatedTrace { start: GridCell, limit: usize },
    /// A hole cluster found no outer-boundary edge to cut through to.
    MissingCutout { cluster: usize },
    /// A ring with no corners reached polygon assembly.
    EmptyRing,
    /// Configuration document could not be parsed.
    Config(serde_json::Error),
}

impl Error {
    /// Whether a region failing with this error can be skipped for one refresh
    ///
    /// False for broken internal invariants and for configuration errors,
    /// which are not tied to any region.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnterminatedTrace { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedTrace { start, limit } => {
                write!(f, "boundary trace from ({}, {}) did not close within {limit} steps", start.x, start.z)
            }
            Self::MissingCutout { cluster } => write!(f, "no cutout found for hole cluster {cluster}"),
            Self::EmptyRing => write!(f, "empty ring reached polygon assembly"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}
