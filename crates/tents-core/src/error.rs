//! Geometry errors shared by the mesh and pitching crates.
//!
//! These indicate malformed input data. The scheduler cannot work around
//! them, so they are never retried.

use std::error::Error;
use std::fmt;

use crate::id::ElementId;

/// Invalid geometry or wave-speed data for a mesh.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// An element's wave-speed bound is zero, negative, or not finite.
    NonPositiveWaveSpeed {
        /// The offending element.
        element: ElementId,
        /// The speed that was supplied or evaluated.
        speed: f64,
    },
    /// A per-element wave-speed table does not match the element count.
    WaveSpeedCount {
        /// Number of elements in the mesh.
        expected: usize,
        /// Number of speeds supplied.
        got: usize,
    },
    /// An element has (numerically) zero measure.
    DegenerateElement {
        /// The offending element.
        element: ElementId,
        /// The computed length, area, or volume.
        measure: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWaveSpeed { element, speed } => {
                write!(
                    f,
                    "wave speed on element {element} must be finite and positive, got {speed}"
                )
            }
            Self::WaveSpeedCount { expected, got } => {
                write!(f, "expected {expected} per-element wave speeds, got {got}")
            }
            Self::DegenerateElement { element, measure } => {
                write!(f, "element {element} is degenerate (measure {measure:e})")
            }
        }
    }
}

impl Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_element() {
        let e = GeometryError::NonPositiveWaveSpeed {
            element: ElementId(4),
            speed: 0.0,
        };
        assert!(e.to_string().contains("element 4"));

        let e = GeometryError::DegenerateElement {
            element: ElementId(9),
            measure: 0.0,
        };
        assert!(e.to_string().contains("element 9"));
    }
}
