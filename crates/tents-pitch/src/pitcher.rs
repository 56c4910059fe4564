//! The advancing-front scheduler.
//!
//! [`TentSlabPitcher`] decides *where* the next tent goes and *how tall* it
//! may be. It owns the pole-height strategy and the per-vertex reference
//! heights, and operates on a [`FrontState`] owned by the caller.

use tents_core::{GeometryError, VertexId};
use tents_mesh::MeshGraph;

use crate::front::FrontState;
use crate::strategy::{MeshData, PoleHeightStrategy};

/// Greedy vertex selection over a causal front.
pub struct TentSlabPitcher {
    strategy: Box<dyn PoleHeightStrategy>,
    vertex_refdt: Vec<f64>,
    global_ct: f64,
}

impl TentSlabPitcher {
    /// Wrap a strategy. `global_ct` scales every admissible height.
    pub fn new(strategy: Box<dyn PoleHeightStrategy>, global_ct: f64) -> Self {
        Self {
            strategy,
            vertex_refdt: Vec::new(),
            global_ct,
        }
    }

    /// Name of the underlying strategy.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Whether the strategy handles meshes of this dimension.
    pub fn supports_dimension(&self, dim: usize) -> bool {
        self.strategy.supports_dimension(dim)
    }

    /// Hand the mesh data for the coming pitch to the strategy.
    pub fn initialize_mesh_data(&mut self, data: &MeshData<'_>) -> Result<(), GeometryError> {
        self.strategy.initialize_mesh_data(data)
    }

    /// Reference height of every vertex: the scaled pole height over a flat
    /// front, capped at `dt`. Images copy their master.
    pub fn compute_vertices_reference_height(&mut self, graph: &MeshGraph, dt: f64) {
        let flat = vec![0.0; graph.mesh().n_vertices()];
        let mut refdt = vec![0.0; flat.len()];
        for &m in graph.masters() {
            let h = self.pole_height(m, &flat, graph).min(dt);
            for &x in graph.images(m) {
                refdt[x.index()] = h;
            }
        }
        self.vertex_refdt = refdt;
    }

    /// Reference heights from the last call to
    /// [`compute_vertices_reference_height`](Self::compute_vertices_reference_height).
    pub fn vertices_reference_height(&self) -> &[f64] {
        &self.vertex_refdt
    }

    /// Admissible advance at master `v`, scaled by the causality factor.
    pub fn pole_height(&self, v: VertexId, tau: &[f64], graph: &MeshGraph) -> f64 {
        self.global_ct * self.strategy.pole_height(v, tau, graph)
    }

    fn is_worth_advancing(&self, v: VertexId, adv_factor: f64, front: &FrontState) -> bool {
        front.ktilde[v.index()] > adv_factor * self.vertex_refdt[v.index()]
    }

    /// Compute `ktilde` at every master from scratch.
    pub fn init_ktilde(&self, front: &mut FrontState, graph: &MeshGraph) {
        for &m in graph.masters() {
            front.ktilde[m.index()] = self.pole_height(m, &front.tau, graph);
        }
    }

    /// Scan every incomplete master and fill the ready set with those that
    /// can advance by more than `adv_factor` of their reference height.
    ///
    /// Returns `false` when no vertex qualifies.
    pub fn get_ready_vertices(
        &self,
        adv_factor: f64,
        front: &mut FrontState,
        graph: &MeshGraph,
    ) -> bool {
        for &m in graph.masters() {
            if !front.complete[m.index()] && self.is_worth_advancing(m, adv_factor, front) {
                front.ready.insert(m);
            }
        }
        !front.ready.is_empty()
    }

    /// Level a tent at master `v` would get: one above the latest tent at
    /// `v` or any neighbouring master, or zero if there is none.
    pub fn candidate_level(&self, v: VertexId, front: &FrontState, graph: &MeshGraph) -> u32 {
        std::iter::once(&v)
            .chain(graph.master_neighbours(v))
            .filter_map(|w| front.latest_level[w.index()])
            .map(|l| l + 1)
            .max()
            .unwrap_or(0)
    }

    /// Choose the next ready vertex: lowest candidate level first, then
    /// largest `ktilde`, then lowest vertex id.
    ///
    /// Returns the position in the ready set and the tent level, or `None`
    /// when the ready set is empty.
    pub fn pick_next_vertex_for_pitching(
        &self,
        front: &FrontState,
        graph: &MeshGraph,
    ) -> Option<(usize, u32)> {
        let mut best: Option<(usize, u32, f64, VertexId)> = None;
        for (pos, &v) in front.ready.iter().enumerate() {
            let level = self.candidate_level(v, front, graph);
            let kt = front.ktilde[v.index()];
            let better = match best {
                None => true,
                Some((_, bl, bk, bv)) => {
                    level < bl || (level == bl && (kt > bk || (kt == bk && v < bv)))
                }
            };
            if better {
                best = Some((pos, level, kt, v));
            }
        }
        best.map(|(pos, level, _, _)| (pos, level))
    }

    /// After `v` advanced: refresh `ktilde` at `v` and its incomplete
    /// neighbours and update their ready membership.
    ///
    /// Neighbour front times are never modified.
    pub fn update_neighbours(
        &self,
        v: VertexId,
        adv_factor: f64,
        front: &mut FrontState,
        graph: &MeshGraph,
    ) {
        for &w in std::iter::once(&v).chain(graph.master_neighbours(v)) {
            if front.complete[w.index()] {
                continue;
            }
            front.ktilde[w.index()] = self.pole_height(w, &front.tau, graph);
            if self.is_worth_advancing(w, adv_factor, front) {
                front.ready.insert(w);
            } else {
                front.ready.shift_remove(&w);
            }
        }
    }
}

impl std::fmt::Debug for TentSlabPitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TentSlabPitcher")
            .field("strategy", &self.strategy.name())
            .field("global_ct", &self.global_ct)
            .field("vertices", &self.vertex_refdt.len())
            .finish()
    }
}
