//! Simplex meshes for tent pitching.
//!
//! This crate owns everything the scheduler reads but never changes: the
//! mesh and its adjacency tables, the periodic vertex identification, the
//! per-element shape data, and the wave-speed bounds.
//!
//! # Building blocks
//!
//! - [`Mesh`]: unstructured 1D/2D/3D simplex mesh, plus structured builders
//!   such as [`Mesh::interval`], [`Mesh::unit_square`], and [`Mesh::unit_cube`]
//! - [`PeriodicMap`]: vertex → master identification
//! - [`MeshGraph`]: a mesh with its periodic map and master adjacency
//! - [`SimplexGeometry`]: measures and barycentric gradients
//! - [`WaveSpeedField`]: per-element characteristic speed bounds

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod builders;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod mesh;
pub mod periodic;
pub mod wavespeed;

pub use error::MeshError;
pub use geometry::{element_geometry, mesh_geometry, SimplexGeometry};
pub use graph::MeshGraph;
pub use mesh::Mesh;
pub use periodic::PeriodicMap;
pub use wavespeed::{SpeedFn, WaveSpeedField};
