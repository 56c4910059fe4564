//! Per-run working set of the advancing front.

use indexmap::IndexSet;
use smallvec::SmallVec;
use tents_core::{TentId, VertexId};
use tents_mesh::MeshGraph;

/// Mutable state of one pitching run.
///
/// All per-vertex arrays are indexed by raw vertex id. Times are mirrored
/// to every periodic image, so `tau` can be read at any vertex; the
/// remaining entries are only meaningful at masters.
#[derive(Clone, Debug)]
pub struct FrontState {
    pub(crate) tau: Vec<f64>,
    pub(crate) target: Vec<f64>,
    pub(crate) ktilde: Vec<f64>,
    pub(crate) complete: Vec<bool>,
    pub(crate) ready: IndexSet<VertexId>,
    pub(crate) latest_level: Vec<Option<u32>>,
    pub(crate) latest_tents: Vec<SmallVec<[TentId; 2]>>,
    n_incomplete: usize,
}

impl FrontState {
    /// Start a front at `bottom`, aiming for `bottom + dt` everywhere.
    ///
    /// `ktilde` starts at zero; the pitcher fills it in.
    pub fn new(graph: &MeshGraph, bottom: &[f64], dt: f64) -> Self {
        let n = bottom.len();
        Self {
            tau: bottom.to_vec(),
            target: bottom.iter().map(|b| b + dt).collect(),
            ktilde: vec![0.0; n],
            complete: vec![false; n],
            ready: IndexSet::new(),
            latest_level: vec![None; n],
            latest_tents: vec![SmallVec::new(); n],
            n_incomplete: graph.n_masters(),
        }
    }

    /// Current front time at a vertex.
    pub fn tau(&self, v: VertexId) -> f64 {
        self.tau[v.index()]
    }

    /// The whole front, indexed by raw vertex.
    pub fn times(&self) -> &[f64] {
        &self.tau
    }

    /// Time a vertex must reach to complete the slab.
    pub fn target(&self, v: VertexId) -> f64 {
        self.target[v.index()]
    }

    /// Current admissible advance at a master.
    pub fn ktilde(&self, v: VertexId) -> f64 {
        self.ktilde[v.index()]
    }

    /// Whether a master has reached the slab top.
    pub fn is_complete(&self, v: VertexId) -> bool {
        self.complete[v.index()]
    }

    /// Masters that have not reached the slab top yet.
    pub fn n_incomplete(&self) -> usize {
        self.n_incomplete
    }

    /// Masters currently eligible for pitching, in insertion order.
    pub fn ready_vertices(&self) -> &IndexSet<VertexId> {
        &self.ready
    }

    /// Level of the latest tent at a master, if any was pitched.
    pub fn level(&self, v: VertexId) -> Option<u32> {
        self.latest_level[v.index()]
    }

    /// Tents most recently pitched at a master (one per periodic image).
    pub fn latest_tents(&self, v: VertexId) -> &[TentId] {
        &self.latest_tents[v.index()]
    }

    /// Raise master `v` and all its images to `ttop`, marking it complete
    /// when `ttop` reaches the target.
    pub(crate) fn advance(&mut self, v: VertexId, ttop: f64, graph: &MeshGraph) {
        for &x in graph.images(v) {
            self.tau[x.index()] = ttop;
        }
        if ttop >= self.target[v.index()] && !self.complete[v.index()] {
            self.complete[v.index()] = true;
            self.n_incomplete -= 1;
            self.ready.shift_remove(&v);
        }
    }

    /// Record the tent group just pitched at master `v`.
    pub(crate) fn record_tents(&mut self, v: VertexId, level: u32, tents: SmallVec<[TentId; 2]>) {
        self.latest_level[v.index()] = Some(level);
        self.latest_tents[v.index()] = tents;
    }

    /// Largest admissible advance over incomplete masters.
    pub(crate) fn max_incomplete_ktilde(&self, graph: &MeshGraph) -> f64 {
        graph
            .masters()
            .iter()
            .filter(|v| !self.complete[v.index()])
            .map(|v| self.ktilde[v.index()])
            .fold(0.0, f64::max)
    }

    /// Consume the state, returning the final front.
    pub(crate) fn into_times(self) -> Vec<f64> {
        self.tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tents_mesh::{Mesh, PeriodicMap};

    #[test]
    fn advance_mirrors_images_and_completes() {
        let mesh = Mesh::interval(0.0, 1.0, 3).unwrap();
        let graph = MeshGraph::new(mesh, PeriodicMap::interval(3).unwrap()).unwrap();
        let mut front = FrontState::new(&graph, &[0.0; 4], 0.5);
        assert_eq!(front.n_incomplete(), 3);
        front.advance(VertexId(0), 0.2, &graph);
        assert_eq!(front.tau(VertexId(3)), 0.2);
        assert!(!front.is_complete(VertexId(0)));
        front.advance(VertexId(0), 0.5, &graph);
        assert!(front.is_complete(VertexId(0)));
        assert_eq!(front.n_incomplete(), 2);
        // Completing twice does not double count.
        front.advance(VertexId(0), 0.5, &graph);
        assert_eq!(front.n_incomplete(), 2);
    }

    #[test]
    fn resumed_front_targets_bottom_plus_dt() {
        let graph = MeshGraph::non_periodic(Mesh::interval(0.0, 1.0, 1).unwrap());
        let front = FrontState::new(&graph, &[1.0, 1.25], 0.5);
        assert_eq!(front.target(VertexId(0)), 1.5);
        assert_eq!(front.target(VertexId(1)), 1.75);
        assert_eq!(front.level(VertexId(0)), None);
        assert!(front.latest_tents(VertexId(1)).is_empty());
    }
}
