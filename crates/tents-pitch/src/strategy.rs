//! The [`PoleHeightStrategy`] trait and the mesh data it is built from.

use tents_core::{GeometryError, VertexId};
use tents_mesh::{MeshGraph, SimplexGeometry};

/// Everything a strategy may precompute from before pitching starts.
#[derive(Clone, Copy, Debug)]
pub struct MeshData<'a> {
    /// Mesh, periodic map, and master adjacency.
    pub graph: &'a MeshGraph,
    /// Shape data, indexed by element id.
    pub geometry: &'a [SimplexGeometry],
    /// Wave-speed bound, indexed by element id.
    pub cmax: &'a [f64],
}

/// Computes how far one vertex of the front may advance.
///
/// # Contract
///
/// - [`initialize_mesh_data`](Self::initialize_mesh_data) is called once
///   per pitch, before any pole height is requested.
/// - [`pole_height`](Self::pole_height) is pure: it reads `tau` and the
///   precomputed data and returns a `Δ ≥ 0` such that raising every image
///   of master `v` by `Δ` keeps each incident element causal. It need not
///   be the largest such value. Zero means `v` cannot currently move.
/// - Any `Δ' ∈ [0, Δ]` must also be causal, so callers may scale the
///   result down.
///
/// # Object safety
///
/// The scheduler stores strategies as `Box<dyn PoleHeightStrategy>`.
///
/// # Examples
///
/// A strategy that lets every vertex advance by a fixed amount:
///
/// ```
/// use tents_core::{GeometryError, VertexId};
/// use tents_mesh::MeshGraph;
/// use tents_pitch::{MeshData, PoleHeightStrategy};
///
/// struct Fixed(f64);
///
/// impl PoleHeightStrategy for Fixed {
///     fn name(&self) -> &str { "fixed" }
///
///     fn initialize_mesh_data(&mut self, _: &MeshData<'_>) -> Result<(), GeometryError> {
///         Ok(())
///     }
///
///     fn pole_height(&self, _: VertexId, _: &[f64], _: &MeshGraph) -> f64 {
///         self.0
///     }
/// }
///
/// assert!(Fixed(0.1).supports_dimension(2));
/// ```
pub trait PoleHeightStrategy: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether the strategy can handle meshes of this spatial dimension.
    ///
    /// Default: 1, 2, and 3.
    fn supports_dimension(&self, dim: usize) -> bool {
        (1..=3).contains(&dim)
    }

    /// Precompute per-element or per-edge data for the coming pitch.
    fn initialize_mesh_data(&mut self, data: &MeshData<'_>) -> Result<(), GeometryError>;

    /// Causal advance at master `v` for the front `tau`.
    ///
    /// `tau` is indexed by raw vertex and holds equal values on all
    /// images of a master.
    fn pole_height(&self, v: VertexId, tau: &[f64], graph: &MeshGraph) -> f64;
}
