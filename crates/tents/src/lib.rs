//! Tents: causality-constrained tent pitching on simplicial meshes.
//!
//! This is the facade crate re-exporting the public API of the `tents-*`
//! sub-crates. A spacetime slab `mesh × [t, t + dt]` is covered by tents:
//! each tent raises the time front at one vertex while keeping the front
//! gradient below the inverse wave speed, and records which earlier tents
//! it depends on. The result can be consumed level by level or through a
//! dependency-driven worker pool.
//!
//! # Quick start
//!
//! ```rust
//! use tents::prelude::*;
//!
//! // 4×4 unit square, wave speed 1, slab height 0.25.
//! let graph = MeshGraph::non_periodic(Mesh::unit_square(4).unwrap());
//! let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
//! slab.pitch_tents(0.25, &WaveSpeedField::Constant(1.0)).unwrap();
//! assert!(slab.front_top().iter().all(|&t| t == 0.25));
//! assert!(slab.max_slope() <= 1.0 + 1e-8);
//!
//! // Visit every tent after all of its dependencies.
//! let mut exec = TentExecutor::new(ExecConfig::with_workers(2)).unwrap();
//! exec.run_parallel(&slab, |_id, tent| {
//!     assert!(tent.height() > 0.0);
//!     Ok::<(), std::convert::Infallible>(())
//! })
//! .unwrap();
//! assert_eq!(exec.metrics().tents, slab.n_tents());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tents-core` | IDs, vector helpers, geometry errors |
//! | [`mesh`] | `tents-mesh` | Simplex meshes, periodicity, geometry, wave speeds |
//! | [`pitch`] | `tents-pitch` | Pitching strategies, tents, the slab and its DAG |
//! | [`engine`] | `tents-engine` | Sequential and parallel tent execution |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Typed indices and small vector helpers (`tents-core`).
pub use tents_core as types;

/// Meshes, periodic maps, element geometry, and wave-speed fields
/// (`tents-mesh`).
pub use tents_mesh as mesh;

/// Tent pitching (`tents-pitch`).
///
/// [`pitch::TentPitchedSlab`] drives the front; [`pitch::verify`] re-checks
/// the invariants of a finished slab.
pub use tents_pitch as pitch;

/// Tent execution (`tents-engine`).
pub use tents_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use tents::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use tents_core::{ElementId, TentId, VertexId};

    // Mesh
    pub use tents_mesh::{Mesh, MeshGraph, PeriodicMap, WaveSpeedField};

    // Pitching
    pub use tents_pitch::{
        PitchConfig, PitchError, PitchingMethod, PoleHeightStrategy, Tent, TentPitchedSlab,
    };

    // Execution
    pub use tents_engine::{ExecConfig, ExecError, ExecMetrics, TentExecutor};
}
