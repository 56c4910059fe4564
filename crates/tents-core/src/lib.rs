//! Core identifiers and error types for tent-pitched spacetime slabs.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the strongly-typed ids used across the workspace (vertices, edges,
//! facets, elements, tents) and the [`GeometryError`] raised when mesh or
//! wave-speed data is malformed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::GeometryError;
pub use id::{EdgeId, ElementId, FacetId, TentId, VertexId};

/// A gradient vector in physical space, padded to three components.
///
/// Components beyond the mesh dimension are always zero, so norms and dot
/// products can ignore the dimension.
pub type Vec3 = [f64; 3];

/// Euclidean dot product of two padded vectors.
#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Euclidean norm of a padded vector.
#[inline]
pub fn norm(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}
