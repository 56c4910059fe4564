//! Error types for mesh construction and periodic identification.

use std::error::Error;
use std::fmt;

use tents_core::{ElementId, VertexId};

/// Errors arising from mesh or periodic-map construction.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshError {
    /// Attempted to construct a mesh with no vertices or no elements.
    EmptyMesh,
    /// Only 1D, 2D, and 3D simplex meshes are supported.
    UnsupportedDimension {
        /// The requested spatial dimension.
        dim: usize,
    },
    /// The flat coordinate array length is not a multiple of the dimension.
    CoordinateCount {
        /// The dimension the coordinates were interpreted with.
        dim: usize,
        /// Length of the coordinate array.
        got: usize,
    },
    /// A vertex coordinate is NaN or infinite.
    NonFiniteCoordinate {
        /// The offending vertex.
        vertex: VertexId,
    },
    /// An element does not have `dim + 1` vertices.
    ElementArity {
        /// The offending element.
        element: ElementId,
        /// Required vertex count.
        expected: usize,
        /// Supplied vertex count.
        got: usize,
    },
    /// An element references a vertex that does not exist.
    VertexOutOfRange {
        /// The offending element.
        element: ElementId,
        /// The out-of-range vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        n_vertices: usize,
    },
    /// An element lists the same vertex twice.
    RepeatedVertex {
        /// The offending element.
        element: ElementId,
        /// The repeated vertex.
        vertex: VertexId,
    },
    /// A vertex belongs to no element.
    OrphanVertex {
        /// The unused vertex.
        vertex: VertexId,
    },
    /// A structured-mesh builder received an invalid parameter.
    InvalidResolution {
        /// Parameter name.
        name: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The periodic vertex map does not cover every vertex.
    PeriodicMapLength {
        /// Number of vertices in the mesh.
        expected: usize,
        /// Length of the supplied map.
        got: usize,
    },
    /// A periodic image points outside the vertex range.
    PeriodicImageOutOfRange {
        /// The vertex whose image is invalid.
        vertex: VertexId,
        /// The invalid image index.
        image: u32,
    },
    /// A vertex maps to an image that is itself identified with another
    /// vertex; images must be fixed points of the map.
    PeriodicChain {
        /// The vertex whose image is not a master.
        vertex: VertexId,
        /// Its image.
        image: VertexId,
    },
    /// Two vertices of one element are identified with each other, so the
    /// element collapses under the periodic map.
    PeriodicCollapse {
        /// The collapsing element.
        element: ElementId,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh must have at least one vertex and one element"),
            Self::UnsupportedDimension { dim } => {
                write!(f, "spatial dimension {dim} not supported (expected 1, 2, or 3)")
            }
            Self::CoordinateCount { dim, got } => {
                write!(f, "{got} coordinates cannot be split into {dim}D points")
            }
            Self::NonFiniteCoordinate { vertex } => {
                write!(f, "vertex {vertex} has a non-finite coordinate")
            }
            Self::ElementArity {
                element,
                expected,
                got,
            } => write!(
                f,
                "element {element} has {got} vertices, expected {expected}"
            ),
            Self::VertexOutOfRange {
                element,
                vertex,
                n_vertices,
            } => write!(
                f,
                "element {element} references vertex {vertex}, mesh has {n_vertices} vertices"
            ),
            Self::RepeatedVertex { element, vertex } => {
                write!(f, "element {element} repeats vertex {vertex}")
            }
            Self::OrphanVertex { vertex } => {
                write!(f, "vertex {vertex} belongs to no element")
            }
            Self::InvalidResolution { name, reason } => {
                write!(f, "invalid {name}: {reason}")
            }
            Self::PeriodicMapLength { expected, got } => {
                write!(f, "periodic map has {got} entries, mesh has {expected} vertices")
            }
            Self::PeriodicImageOutOfRange { vertex, image } => {
                write!(f, "periodic image {image} of vertex {vertex} is out of range")
            }
            Self::PeriodicChain { vertex, image } => write!(
                f,
                "vertex {vertex} maps to {image}, which is itself mapped elsewhere"
            ),
            Self::PeriodicCollapse { element } => {
                write!(f, "element {element} collapses under the periodic map")
            }
        }
    }
}

impl Error for MeshError {}
