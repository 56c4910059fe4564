//! Edge-gradient pole heights.
//!
//! Each element gets a bound `r_K` on edge time differences that is
//! sufficient for causality on `K`; each edge keeps the smallest bound of
//! its elements. A vertex may then rise until it is `r_e` above its lowest
//! neighbour along some edge.

use tents_core::{GeometryError, VertexId};
use tents_mesh::MeshGraph;

use crate::strategy::{MeshData, PoleHeightStrategy};

/// Conservative per-edge pole-height strategy.
#[derive(Clone, Debug, Default)]
pub struct EdgeGradientPitcher {
    edge_refdt: Vec<f64>,
}

impl EdgeGradientPitcher {
    /// An uninitialised strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest admissible time difference along each edge.
    pub fn edge_refdt(&self) -> &[f64] {
        &self.edge_refdt
    }
}

impl PoleHeightStrategy for EdgeGradientPitcher {
    fn name(&self) -> &str {
        "edge"
    }

    fn initialize_mesh_data(&mut self, data: &MeshData<'_>) -> Result<(), GeometryError> {
        let mesh = data.graph.mesh();
        self.edge_refdt = vec![f64::INFINITY; mesh.n_edges()];
        for (k, (geom, c)) in data.geometry.iter().zip(data.cmax).enumerate() {
            let r = geom.edge_bound() / c;
            for &edge in mesh.element_edges(tents_core::ElementId(k as u32)) {
                let slot = &mut self.edge_refdt[edge.index()];
                *slot = slot.min(r);
            }
        }
        Ok(())
    }

    fn pole_height(&self, v: VertexId, tau: &[f64], graph: &MeshGraph) -> f64 {
        let tv = tau[v.index()];
        graph
            .master_edges(v)
            .iter()
            .map(|&(nb, edge)| tau[nb.index()] + self.edge_refdt[edge.index()] - tv)
            .fold(f64::INFINITY, f64::min)
            .max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tents_mesh::{mesh_geometry, Mesh, PeriodicMap};

    fn initialised(graph: &MeshGraph, c: f64) -> EdgeGradientPitcher {
        let geometry = mesh_geometry(graph.mesh()).unwrap();
        let cmax = vec![c; graph.mesh().n_elements()];
        let mut p = EdgeGradientPitcher::new();
        p.initialize_mesh_data(&MeshData {
            graph,
            geometry: &geometry,
            cmax: &cmax,
        })
        .unwrap();
        p
    }

    #[test]
    fn edge_bound_in_1d_is_cell_over_speed() {
        let graph = MeshGraph::non_periodic(Mesh::from_points_1d(&[0.0, 1.0, 3.0]).unwrap());
        let p = initialised(&graph, 2.0);
        assert_eq!(p.edge_refdt(), &[0.5, 1.0]);
        let tau = vec![0.0, 0.2, 0.0];
        assert!((p.pole_height(VertexId(1), &tau, &graph) - 0.3).abs() < 1e-15);
        assert!((p.pole_height(VertexId(0), &tau, &graph) - 0.7).abs() < 1e-15);
    }

    #[test]
    fn shared_edges_take_the_smaller_bound() {
        let graph = MeshGraph::non_periodic(Mesh::unit_square(1).unwrap());
        let geometry = mesh_geometry(graph.mesh()).unwrap();
        let cmax = vec![1.0, 4.0];
        let mut p = EdgeGradientPitcher::new();
        p.initialize_mesh_data(&MeshData {
            graph: &graph,
            geometry: &geometry,
            cmax: &cmax,
        })
        .unwrap();
        // The diagonal 0-3 is shared: bound 0.5 / 4.
        let diag = graph
            .mesh()
            .vertex_neighbours(VertexId(0))
            .iter()
            .find(|(w, _)| *w == VertexId(3))
            .map(|&(_, e)| e)
            .unwrap();
        assert!((p.edge_refdt()[diag.index()] - 0.125).abs() < 1e-15);
    }

    #[test]
    fn periodic_neighbours_are_read_through_the_master() {
        let mesh = Mesh::interval(0.0, 3.0, 3).unwrap();
        let graph = MeshGraph::new(mesh, PeriodicMap::interval(3).unwrap()).unwrap();
        let p = initialised(&graph, 1.0);
        // Vertex 3 is the image of 0 and carries its time.
        let tau = vec![0.5, 0.5, 0.0, 0.5];
        assert!((p.pole_height(VertexId(2), &tau, &graph) - 1.5).abs() < 1e-15);
        assert!((p.pole_height(VertexId(0), &tau, &graph) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn never_exceeds_volume_bound_on_flat_front() {
        use crate::volume::VolumeGradientPitcher;
        let graph = MeshGraph::non_periodic(Mesh::unit_cube(1).unwrap());
        let geometry = mesh_geometry(graph.mesh()).unwrap();
        let cmax = vec![1.0; graph.mesh().n_elements()];
        let data = MeshData {
            graph: &graph,
            geometry: &geometry,
            cmax: &cmax,
        };
        let edge = initialised(&graph, 1.0);
        let mut vol = VolumeGradientPitcher::new();
        vol.initialize_mesh_data(&data).unwrap();
        let tau = vec![0.0; graph.mesh().n_vertices()];
        for &v in graph.masters() {
            let e = edge.pole_height(v, &tau, &graph);
            let w = vol.pole_height(v, &tau, &graph);
            assert!(e > 0.0 && e <= w + 1e-14);
        }
    }
}
