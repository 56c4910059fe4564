//! Master-vertex adjacency for (possibly periodic) meshes.

use indexmap::IndexSet;
use smallvec::SmallVec;
use tents_core::{EdgeId, ElementId, VertexId};

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::periodic::PeriodicMap;

/// A mesh together with its periodic identification.
///
/// The pitcher advances masters only; images follow their master. This
/// type precomputes the adjacency seen from a master: the union over all
/// of its images of neighbouring vertices (mapped to their masters) and of
/// incident elements.
///
/// ```
/// use tents_core::VertexId;
/// use tents_mesh::{Mesh, MeshGraph, PeriodicMap};
///
/// let mesh = Mesh::interval(0.0, 1.0, 4).unwrap();
/// let graph = MeshGraph::new(mesh, PeriodicMap::interval(4).unwrap()).unwrap();
/// // On the periodic circle, vertex 0 neighbours both 1 and 3.
/// assert_eq!(graph.master_neighbours(VertexId(0)), &[VertexId(1), VertexId(3)]);
/// assert_eq!(graph.images(VertexId(0)), &[VertexId(0), VertexId(4)]);
/// ```
#[derive(Clone, Debug)]
pub struct MeshGraph {
    mesh: Mesh,
    periodic: PeriodicMap,
    masters: Vec<VertexId>,
    images: Vec<SmallVec<[VertexId; 2]>>,
    master_edges: Vec<SmallVec<[(VertexId, EdgeId); 8]>>,
    master_neighbours: Vec<SmallVec<[VertexId; 8]>>,
    master_elements: Vec<SmallVec<[ElementId; 8]>>,
}

impl MeshGraph {
    /// Attach a periodic map to a mesh.
    ///
    /// # Errors
    ///
    /// [`MeshError::PeriodicMapLength`] if the map does not cover every
    /// vertex, [`MeshError::PeriodicCollapse`] if two vertices of one
    /// element are identified.
    pub fn new(mesh: Mesh, periodic: PeriodicMap) -> Result<Self, MeshError> {
        let n = mesh.n_vertices();
        if periodic.len() != n {
            return Err(MeshError::PeriodicMapLength {
                expected: n,
                got: periodic.len(),
            });
        }
        for e in 0..mesh.n_elements() {
            let element = ElementId(e as u32);
            let verts = mesh.element_vertices(element);
            let distinct: IndexSet<VertexId> = verts.iter().map(|&v| periodic.master(v)).collect();
            if distinct.len() != verts.len() {
                return Err(MeshError::PeriodicCollapse { element });
            }
        }

        let mut images: Vec<SmallVec<[VertexId; 2]>> = vec![SmallVec::new(); n];
        let mut masters = Vec::new();
        for v in 0..n as u32 {
            let v = VertexId(v);
            if periodic.is_master(v) {
                masters.push(v);
                images[v.index()].push(v);
            }
        }
        for v in 0..n as u32 {
            let v = VertexId(v);
            let m = periodic.master(v);
            if m != v {
                images[m.index()].push(v);
            }
        }

        let mut master_edges = vec![SmallVec::new(); n];
        let mut master_neighbours = vec![SmallVec::new(); n];
        let mut master_elements = vec![SmallVec::new(); n];
        for &m in &masters {
            let mut edges: SmallVec<[(VertexId, EdgeId); 8]> = SmallVec::new();
            let mut elements: IndexSet<ElementId> = IndexSet::new();
            for &x in &images[m.index()] {
                for &(nb, edge) in mesh.vertex_neighbours(x) {
                    let nb = periodic.master(nb);
                    if nb != m {
                        edges.push((nb, edge));
                    }
                }
                elements.extend(mesh.vertex_elements(x).iter().copied());
            }
            edges.sort_unstable();
            let mut nbs: SmallVec<[VertexId; 8]> = edges.iter().map(|&(nb, _)| nb).collect();
            nbs.dedup();
            let mut elements: SmallVec<[ElementId; 8]> = elements.into_iter().collect();
            elements.sort_unstable();

            master_edges[m.index()] = edges;
            master_neighbours[m.index()] = nbs;
            master_elements[m.index()] = elements;
        }

        Ok(Self {
            mesh,
            periodic,
            masters,
            images,
            master_edges,
            master_neighbours,
            master_elements,
        })
    }

    /// Wrap a mesh without periodic identification.
    pub fn non_periodic(mesh: Mesh) -> Self {
        let periodic = PeriodicMap::identity(mesh.n_vertices());
        let n = mesh.n_vertices();
        let masters: Vec<VertexId> = (0..n as u32).map(VertexId).collect();
        let images = masters.iter().map(|&v| SmallVec::from_slice(&[v])).collect();
        let master_edges: Vec<SmallVec<[(VertexId, EdgeId); 8]>> = masters
            .iter()
            .map(|&v| SmallVec::from_slice(mesh.vertex_neighbours(v)))
            .collect();
        let master_neighbours = master_edges
            .iter()
            .map(|edges| edges.iter().map(|&(nb, _)| nb).collect())
            .collect();
        let master_elements = masters
            .iter()
            .map(|&v| SmallVec::from_slice(mesh.vertex_elements(v)))
            .collect();
        Self {
            mesh,
            periodic,
            masters,
            images,
            master_edges,
            master_neighbours,
            master_elements,
        }
    }

    /// The underlying mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// The periodic identification.
    pub fn periodic(&self) -> &PeriodicMap {
        &self.periodic
    }

    /// Master of a vertex.
    #[inline]
    pub fn master(&self, v: VertexId) -> VertexId {
        self.periodic.master(v)
    }

    /// All master vertices, ascending.
    pub fn masters(&self) -> &[VertexId] {
        &self.masters
    }

    /// Number of master vertices.
    pub fn n_masters(&self) -> usize {
        self.masters.len()
    }

    /// Raw vertices identified with a master, the master itself first.
    /// Empty for non-master vertices.
    pub fn images(&self, m: VertexId) -> &[VertexId] {
        &self.images[m.index()]
    }

    /// Neighbouring masters of a master with the connecting mesh edge,
    /// sorted. A neighbour appears once per distinct edge; edges that
    /// collapse to a self-loop under the periodic map are omitted.
    pub fn master_edges(&self, m: VertexId) -> &[(VertexId, EdgeId)] {
        &self.master_edges[m.index()]
    }

    /// Distinct neighbouring masters of a master, sorted.
    pub fn master_neighbours(&self, m: VertexId) -> &[VertexId] {
        &self.master_neighbours[m.index()]
    }

    /// Elements incident to any image of a master, sorted.
    pub fn master_elements(&self, m: VertexId) -> &[ElementId] {
        &self.master_elements[m.index()]
    }
}
