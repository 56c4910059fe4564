//! Simplex meshes with derived adjacency tables.

use indexmap::map::Entry;
use indexmap::IndexMap;
use smallvec::SmallVec;
use tents_core::{EdgeId, ElementId, FacetId, VertexId};

use crate::error::MeshError;

/// An unstructured simplex mesh in one, two, or three dimensions.
///
/// Elements are segments (1D), triangles (2D), or tetrahedra (3D), each
/// listing `dim + 1` vertices. Construction derives every adjacency table
/// the pitcher needs: edges, facets, vertex → elements, vertex → neighbour
/// vertices, and facet → elements. All tables are numbered in first-seen
/// order while walking the elements, so two meshes built from the same
/// input are numbered identically.
///
/// # Examples
///
/// ```
/// use tents_mesh::Mesh;
///
/// // Two triangles sharing the diagonal of the unit square.
/// let mesh = Mesh::new(
///     2,
///     vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
///     &[[0u32, 1, 2], [0, 2, 3]],
/// )
/// .unwrap();
/// assert_eq!(mesh.n_vertices(), 4);
/// assert_eq!(mesh.n_edges(), 5);
/// assert_eq!(mesh.n_facets(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct Mesh {
    dim: usize,
    coords: Vec<f64>,
    elements: Vec<SmallVec<[VertexId; 4]>>,
    edges: Vec<[VertexId; 2]>,
    element_edges: Vec<SmallVec<[EdgeId; 6]>>,
    facets: Vec<SmallVec<[VertexId; 3]>>,
    element_facets: Vec<SmallVec<[FacetId; 4]>>,
    facet_elements: Vec<SmallVec<[ElementId; 2]>>,
    vertex_elements: Vec<SmallVec<[ElementId; 8]>>,
    vertex_neighbours: Vec<SmallVec<[(VertexId, EdgeId); 8]>>,
}

impl Mesh {
    /// Build a mesh from flat coordinates and element connectivity.
    ///
    /// `coords` holds `dim` values per vertex. Each element lists `dim + 1`
    /// vertex indices.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if the dimension is not 1–3, the mesh is
    /// empty, coordinates are malformed or non-finite, an element has the
    /// wrong arity or references an invalid or repeated vertex, or some
    /// vertex belongs to no element.
    pub fn new<E: AsRef<[u32]>>(
        dim: usize,
        coords: Vec<f64>,
        elements: &[E],
    ) -> Result<Self, MeshError> {
        if !(1..=3).contains(&dim) {
            return Err(MeshError::UnsupportedDimension { dim });
        }
        if coords.len() % dim != 0 {
            return Err(MeshError::CoordinateCount {
                dim,
                got: coords.len(),
            });
        }
        let n_vertices = coords.len() / dim;
        if n_vertices == 0 || elements.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        if let Some(pos) = coords.iter().position(|c| !c.is_finite()) {
            return Err(MeshError::NonFiniteCoordinate {
                vertex: VertexId((pos / dim) as u32),
            });
        }

        let mut elems: Vec<SmallVec<[VertexId; 4]>> = Vec::with_capacity(elements.len());
        for (k, raw) in elements.iter().enumerate() {
            let raw = raw.as_ref();
            let element = ElementId(k as u32);
            if raw.len() != dim + 1 {
                return Err(MeshError::ElementArity {
                    element,
                    expected: dim + 1,
                    got: raw.len(),
                });
            }
            let mut verts: SmallVec<[VertexId; 4]> = SmallVec::new();
            for &v in raw {
                if v as usize >= n_vertices {
                    return Err(MeshError::VertexOutOfRange {
                        element,
                        vertex: v,
                        n_vertices,
                    });
                }
                let v = VertexId(v);
                if verts.contains(&v) {
                    return Err(MeshError::RepeatedVertex { element, vertex: v });
                }
                verts.push(v);
            }
            elems.push(verts);
        }

        let mut mesh = Self {
            dim,
            coords,
            elements: elems,
            edges: Vec::new(),
            element_edges: Vec::new(),
            facets: Vec::new(),
            element_facets: Vec::new(),
            facet_elements: Vec::new(),
            vertex_elements: vec![SmallVec::new(); n_vertices],
            vertex_neighbours: vec![SmallVec::new(); n_vertices],
        };
        mesh.build_tables()?;
        Ok(mesh)
    }

    fn build_tables(&mut self) -> Result<(), MeshError> {
        let mut edge_index: IndexMap<(VertexId, VertexId), EdgeId> = IndexMap::new();
        let mut facet_index: IndexMap<SmallVec<[VertexId; 3]>, FacetId> = IndexMap::new();

        for (k, verts) in self.elements.iter().enumerate() {
            let element = ElementId(k as u32);
            for &v in verts {
                self.vertex_elements[v.index()].push(element);
            }

            let mut el_edges = SmallVec::new();
            for i in 0..verts.len() {
                for j in (i + 1)..verts.len() {
                    let key = (verts[i].min(verts[j]), verts[i].max(verts[j]));
                    let next = EdgeId(edge_index.len() as u32);
                    el_edges.push(*edge_index.entry(key).or_insert(next));
                }
            }
            self.element_edges.push(el_edges);

            // Local facet `i` is the one opposite local vertex `i`.
            let mut el_facets = SmallVec::new();
            for skip in 0..verts.len() {
                let mut key: SmallVec<[VertexId; 3]> = verts
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v)
                    .collect();
                key.sort_unstable();
                let facet = match facet_index.entry(key) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        let id = FacetId(self.facet_elements.len() as u32);
                        self.facet_elements.push(SmallVec::new());
                        *e.insert(id)
                    }
                };
                self.facet_elements[facet.index()].push(element);
                el_facets.push(facet);
            }
            self.element_facets.push(el_facets);
        }

        if let Some(v) = self.vertex_elements.iter().position(|els| els.is_empty()) {
            return Err(MeshError::OrphanVertex {
                vertex: VertexId(v as u32),
            });
        }

        self.edges = edge_index.keys().map(|&(a, b)| [a, b]).collect();
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            let edge = EdgeId(e as u32);
            self.vertex_neighbours[a.index()].push((b, edge));
            self.vertex_neighbours[b.index()].push((a, edge));
        }
        for nbs in &mut self.vertex_neighbours {
            nbs.sort_unstable();
        }
        self.facets = facet_index.into_keys().collect();
        Ok(())
    }

    /// Spatial dimension (1, 2, or 3).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vertices.
    pub fn n_vertices(&self) -> usize {
        self.vertex_elements.len()
    }

    /// Number of elements.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of edges.
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of facets.
    pub fn n_facets(&self) -> usize {
        self.facets.len()
    }

    /// Coordinates of a vertex (`dim` values).
    pub fn point(&self, v: VertexId) -> &[f64] {
        let start = v.index() * self.dim;
        &self.coords[start..start + self.dim]
    }

    /// Vertices of an element, in the order given at construction.
    pub fn element_vertices(&self, e: ElementId) -> &[VertexId] {
        &self.elements[e.index()]
    }

    /// Edges of an element.
    pub fn element_edges(&self, e: ElementId) -> &[EdgeId] {
        &self.element_edges[e.index()]
    }

    /// Facets of an element; entry `i` is opposite local vertex `i`.
    pub fn element_facets(&self, e: ElementId) -> &[FacetId] {
        &self.element_facets[e.index()]
    }

    /// Endpoints of an edge, smaller id first.
    pub fn edge_vertices(&self, e: EdgeId) -> [VertexId; 2] {
        self.edges[e.index()]
    }

    /// Vertices of a facet, sorted by id.
    pub fn facet_vertices(&self, f: FacetId) -> &[VertexId] {
        &self.facets[f.index()]
    }

    /// Elements sharing a facet (one on the boundary, two inside).
    pub fn facet_elements(&self, f: FacetId) -> &[ElementId] {
        &self.facet_elements[f.index()]
    }

    /// Whether a facet lies on the mesh boundary.
    pub fn is_boundary_facet(&self, f: FacetId) -> bool {
        self.facet_elements[f.index()].len() == 1
    }

    /// Elements whose closure contains a vertex, in element order.
    pub fn vertex_elements(&self, v: VertexId) -> &[ElementId] {
        &self.vertex_elements[v.index()]
    }

    /// Vertices sharing an edge with `v`, sorted by vertex id, each with
    /// the connecting edge.
    pub fn vertex_neighbours(&self, v: VertexId) -> &[(VertexId, EdgeId)] {
        &self.vertex_neighbours[v.index()]
    }
}
