//! Error types for configuration and slab pitching.

use std::error::Error;
use std::fmt;

use tents_core::{GeometryError, VertexId};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`PitchConfig::validate()`](crate::PitchConfig::validate)
/// or while parsing a [`PitchingMethod`](crate::PitchingMethod).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `initial_adv_factor` is not in `(0, 1]`.
    InvalidAdvFactor {
        /// The invalid value.
        value: f64,
    },
    /// `global_ct` is not in `(0, 1]`.
    InvalidGlobalCt {
        /// The invalid value.
        value: f64,
    },
    /// A method name did not match any known strategy.
    UnknownMethod {
        /// The unrecognised name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAdvFactor { value } => {
                write!(f, "initial_adv_factor must lie in (0, 1], got {value}")
            }
            Self::InvalidGlobalCt { value } => {
                write!(f, "global_ct must lie in (0, 1], got {value}")
            }
            Self::UnknownMethod { name } => write!(
                f,
                "unknown pitching method '{name}' (expected 'vol' or 'edge')"
            ),
        }
    }
}

impl Error for ConfigError {}

// ── PitchError ─────────────────────────────────────────────────────

/// Errors from constructing a slab or pitching tents.
///
/// A failed pitch never leaves a partial tent set behind.
#[derive(Clone, Debug, PartialEq)]
pub enum PitchError {
    /// Wave-speed or element geometry is unusable.
    InvalidGeometry(GeometryError),
    /// The pitching configuration is invalid.
    Config(ConfigError),
    /// The pole-height strategy cannot handle the mesh dimension.
    UnsupportedDimension {
        /// Name of the strategy.
        strategy: String,
        /// Spatial dimension of the mesh.
        dim: usize,
    },
    /// The requested slab height is not finite and positive.
    InvalidSlabHeight {
        /// The rejected height.
        dt: f64,
    },
    /// A bottom front does not fit the mesh.
    InvalidFront {
        /// Description of the problem.
        reason: String,
    },
    /// A bottom front assigns an image a different time than its master.
    InconsistentPeriodicity {
        /// The image vertex.
        vertex: VertexId,
        /// Its master.
        master: VertexId,
    },
    /// The front stopped advancing: either the retry budget was used up
    /// or no incomplete vertex admits any advance at all.
    FrontStalled {
        /// Advance factor at the time of failure.
        adv_factor: f64,
        /// Consecutive reductions attempted in the failing round.
        retries: u32,
        /// Vertices that had not reached the slab top.
        incomplete: usize,
    },
}

impl fmt::Display for PitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry(e) => write!(f, "invalid geometry: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnsupportedDimension { strategy, dim } => {
                write!(f, "strategy '{strategy}' does not support {dim}D meshes")
            }
            Self::InvalidSlabHeight { dt } => {
                write!(f, "slab height must be finite and positive, got {dt}")
            }
            Self::InvalidFront { reason } => write!(f, "invalid bottom front: {reason}"),
            Self::InconsistentPeriodicity { vertex, master } => write!(
                f,
                "bottom front differs between vertex {vertex} and its periodic master {master}"
            ),
            Self::FrontStalled {
                adv_factor,
                retries,
                incomplete,
            } => write!(
                f,
                "front stalled with {incomplete} incomplete vertices \
                 after {retries} retries (adv_factor {adv_factor:e})"
            ),
        }
    }
}

impl Error for PitchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for PitchError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e)
    }
}

impl From<ConfigError> for PitchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
