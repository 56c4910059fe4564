//! Periodic vertex identification.

use tents_core::VertexId;

use crate::error::MeshError;

/// Immutable map from each vertex to its periodic master.
///
/// A vertex whose image is itself is a *master*; every other vertex is an
/// *image* identified with a master and always advances with it. The map
/// is idempotent: the image of an image is never taken.
///
/// # Examples
///
/// ```
/// use tents_core::VertexId;
/// use tents_mesh::PeriodicMap;
///
/// // Interval with 4 cells: vertex 4 is identified with vertex 0.
/// let map = PeriodicMap::interval(4).unwrap();
/// assert_eq!(map.master(VertexId(4)), VertexId(0));
/// assert!(map.is_master(VertexId(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodicMap {
    vmap: Vec<VertexId>,
}

impl PeriodicMap {
    /// The trivial map of a non-periodic mesh.
    pub fn identity(n_vertices: usize) -> Self {
        Self {
            vmap: (0..n_vertices as u32).map(VertexId).collect(),
        }
    }

    /// Build a map from raw image indices.
    ///
    /// # Errors
    ///
    /// [`MeshError::PeriodicImageOutOfRange`] if an image does not exist,
    /// [`MeshError::PeriodicChain`] if an image is not its own master.
    pub fn new(vmap: Vec<u32>) -> Result<Self, MeshError> {
        let n = vmap.len();
        for (v, &image) in vmap.iter().enumerate() {
            if image as usize >= n {
                return Err(MeshError::PeriodicImageOutOfRange {
                    vertex: VertexId(v as u32),
                    image,
                });
            }
            if vmap[image as usize] != image {
                return Err(MeshError::PeriodicChain {
                    vertex: VertexId(v as u32),
                    image: VertexId(image),
                });
            }
        }
        Ok(Self {
            vmap: vmap.into_iter().map(VertexId).collect(),
        })
    }

    /// Periodic map for [`Mesh::interval`](crate::Mesh::interval) with `n`
    /// cells: the right end is identified with the left end.
    pub fn interval(n: usize) -> Result<Self, MeshError> {
        if n == 0 {
            return Err(MeshError::InvalidResolution {
                name: "n",
                reason: "must be at least 1".into(),
            });
        }
        let mut vmap: Vec<u32> = (0..=n as u32).collect();
        vmap[n] = 0;
        Self::new(vmap)
    }

    /// Periodic map for [`Mesh::rectangle`](crate::Mesh::rectangle) with
    /// `nx × ny` cells, wrapping in `x` and/or `y`.
    pub fn rectangle(
        nx: usize,
        ny: usize,
        periodic_x: bool,
        periodic_y: bool,
    ) -> Result<Self, MeshError> {
        if nx == 0 || ny == 0 {
            return Err(MeshError::InvalidResolution {
                name: "nx/ny",
                reason: "must be at least 1".into(),
            });
        }
        let id = |i: usize, j: usize| (j * (nx + 1) + i) as u32;
        let mut vmap = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                let mi = if periodic_x && i == nx { 0 } else { i };
                let mj = if periodic_y && j == ny { 0 } else { j };
                vmap.push(id(mi, mj));
            }
        }
        Self::new(vmap)
    }

    /// Number of vertices covered by the map.
    pub fn len(&self) -> usize {
        self.vmap.len()
    }

    /// Whether the map covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.vmap.is_empty()
    }

    /// The master a vertex is identified with.
    #[inline]
    pub fn master(&self, v: VertexId) -> VertexId {
        self.vmap[v.index()]
    }

    /// Whether a vertex is its own master.
    #[inline]
    pub fn is_master(&self, v: VertexId) -> bool {
        self.vmap[v.index()] == v
    }

    /// Whether any vertex is identified with another one.
    pub fn is_periodic(&self) -> bool {
        self.vmap
            .iter()
            .enumerate()
            .any(|(v, &m)| m.index() != v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_only_masters() {
        let map = PeriodicMap::identity(4);
        assert!(!map.is_periodic());
        assert!((0..4).all(|v| map.is_master(VertexId(v))));
    }

    #[test]
    fn rejects_out_of_range_image() {
        assert_eq!(
            PeriodicMap::new(vec![0, 7]),
            Err(MeshError::PeriodicImageOutOfRange {
                vertex: VertexId(1),
                image: 7
            })
        );
    }

    #[test]
    fn rejects_chained_images() {
        // 2 -> 1 -> 0: vertex 2's image is not a master.
        assert_eq!(
            PeriodicMap::new(vec![0, 0, 1]),
            Err(MeshError::PeriodicChain {
                vertex: VertexId(2),
                image: VertexId(1)
            })
        );
    }

    #[test]
    fn rectangle_corner_maps_to_origin() {
        let map = PeriodicMap::rectangle(2, 2, true, true).unwrap();
        assert_eq!(map.master(VertexId(8)), VertexId(0));
        assert_eq!(map.master(VertexId(2)), VertexId(0));
        assert_eq!(map.master(VertexId(6)), VertexId(0));
        assert_eq!(map.master(VertexId(5)), VertexId(3));
        assert!(map.is_master(VertexId(4)));
    }

    #[test]
    fn rectangle_single_axis() {
        let map = PeriodicMap::rectangle(2, 1, true, false).unwrap();
        assert_eq!(map.master(VertexId(2)), VertexId(0));
        assert_eq!(map.master(VertexId(5)), VertexId(3));
        assert!(map.is_master(VertexId(4)));
    }
}
