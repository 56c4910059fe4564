//! Volume-gradient pole heights.
//!
//! On an element `K` incident to `v` the front is `φ = Σ τ_j λ_j`. Raising
//! `v` by `Δ` moves the gradient along `g = Σ_{j≅v} ∇λ_j`, so the largest
//! causal advance solves `|G + Δ g|² = 1/c_K²` with `G = Σ τ_j ∇λ_j`. The
//! constraint is convex in `Δ`, so every smaller advance is causal too.
//!
//! In 2D and 3D a tent takes only [`VOLUME_FILL`] of that advance. A front
//! that touches the cone on an element with a right angle can leave every
//! vertex of the element at zero height, and such elements chain into a
//! front where no vertex may rise. Stopping short keeps every element
//! strictly inside the cone, and then each vertex has a positive height.
//! In 1D the lowest vertex of a cell can always rise, so tents there take
//! the full advance.

use smallvec::SmallVec;
use tents_core::{dot, GeometryError, Vec3, VertexId};
use tents_mesh::MeshGraph;

use crate::strategy::{MeshData, PoleHeightStrategy};

/// Share of the exact advance taken by tents on 2D and 3D meshes.
pub const VOLUME_FILL: f64 = 0.9;

/// Exact per-element pole-height strategy.
#[derive(Clone, Debug)]
pub struct VolumeGradientPitcher {
    grad_lambda: Vec<SmallVec<[Vec3; 4]>>,
    cmax: Vec<f64>,
    fill: f64,
}

impl Default for VolumeGradientPitcher {
    fn default() -> Self {
        Self {
            grad_lambda: Vec::new(),
            cmax: Vec::new(),
            fill: 1.0,
        }
    }
}

impl VolumeGradientPitcher {
    /// An uninitialised strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of the exact advance used for the current mesh.
    pub fn fill(&self) -> f64 {
        self.fill
    }
}

impl PoleHeightStrategy for VolumeGradientPitcher {
    fn name(&self) -> &str {
        "vol"
    }

    fn initialize_mesh_data(&mut self, data: &MeshData<'_>) -> Result<(), GeometryError> {
        self.grad_lambda = data
            .geometry
            .iter()
            .map(|g| SmallVec::from_slice(g.grad_lambda()))
            .collect();
        self.cmax = data.cmax.to_vec();
        self.fill = if data.graph.mesh().dim() == 1 {
            1.0
        } else {
            VOLUME_FILL
        };
        Ok(())
    }

    fn pole_height(&self, v: VertexId, tau: &[f64], graph: &MeshGraph) -> f64 {
        let mesh = graph.mesh();
        let mut kt = f64::INFINITY;
        for &e in graph.master_elements(v) {
            let grads = &self.grad_lambda[e.index()];
            let mut big = [0.0; 3];
            let mut small = [0.0; 3];
            for (&x, grad) in mesh.element_vertices(e).iter().zip(grads) {
                let t = tau[x.index()];
                for c in 0..3 {
                    big[c] += t * grad[c];
                }
                if graph.master(x) == v {
                    for c in 0..3 {
                        small[c] += grad[c];
                    }
                }
            }
            if let Some(delta) = largest_root(&big, &small, 1.0 / self.cmax[e.index()]) {
                kt = kt.min(delta);
            }
        }
        self.fill * kt.max(0.0)
    }
}

/// Largest `Δ` with `|G + Δ g| = s`, or `None` when `g` vanishes.
///
/// Returns zero when the quadratic has no real root, which only happens
/// if `|G|` already exceeds `s`.
fn largest_root(big: &Vec3, small: &Vec3, s: f64) -> Option<f64> {
    let a = dot(small, small);
    if a <= f64::EPSILON * f64::EPSILON {
        return None;
    }
    let b = dot(big, small);
    let cc = dot(big, big) - s * s;
    let disc = b * b - a * cc;
    if disc < 0.0 {
        return Some(0.0);
    }
    let sq = disc.sqrt();
    // Avoid cancellation between -b and sqrt(disc).
    Some(if b > 0.0 { -cc / (b + sq) } else { (sq - b) / a })
}
