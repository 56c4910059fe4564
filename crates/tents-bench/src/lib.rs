//! Benchmark profiles for tent pitching.
//!
//! - [`reference_profile`]: 32×32 unit square (2048 triangles), variable speed
//! - [`stress_profile`]: 8×8×8 unit cube (3072 tetrahedra)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tents_mesh::{Mesh, MeshGraph, WaveSpeedField};
use tents_pitch::PitchConfig;

/// A mesh, wave speed, and slab height to pitch.
#[derive(Debug)]
pub struct BenchProfile {
    /// The mesh graph.
    pub graph: MeshGraph,
    /// Wave speed bounds.
    pub speeds: WaveSpeedField,
    /// Slab height.
    pub dt: f64,
    /// Pitching configuration.
    pub config: PitchConfig,
}

/// 32×32 unit square with wave speed `1 + x`.
///
/// dt = 0.05 is several times the reference height, so each vertex
/// receives multiple tents.
pub fn reference_profile(config: PitchConfig) -> BenchProfile {
    BenchProfile {
        graph: MeshGraph::non_periodic(Mesh::unit_square(32).unwrap()),
        speeds: WaveSpeedField::from_fn(|x| 1.0 + x[0]),
        dt: 0.05,
        config,
    }
}

/// 8×8×8 unit cube with unit wave speed.
pub fn stress_profile(config: PitchConfig) -> BenchProfile {
    BenchProfile {
        graph: MeshGraph::non_periodic(Mesh::unit_cube(8).unwrap()),
        speeds: WaveSpeedField::Constant(1.0),
        dt: 0.1,
        config,
    }
}
