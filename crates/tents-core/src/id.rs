//! Strongly-typed identifiers for mesh entities and tents.
//!
//! Every id is a dense `u32` index into the owning table. `index()`
//! converts to `usize` for slice access.

use std::fmt;

/// Identifies a vertex of the spatial mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Position of this vertex in per-vertex tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an edge (a pair of vertices sharing an element).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Position of this edge in per-edge tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EdgeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a facet: a codimension-one face of an element.
///
/// In 1D facets are vertices, in 2D edges, in 3D triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacetId(pub u32);

impl FacetId {
    /// Position of this facet in per-facet tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FacetId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a simplex element of the spatial mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Position of this element in per-element tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a tent within one pitched slab.
///
/// Tents are numbered in pitch order. `TentId(n)` is the n-th tent
/// appended to the slab, so every dependency of a tent has a smaller id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TentId(pub u32);

impl TentId {
    /// Position of this tent in the slab's tent list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_raw_value() {
        assert_eq!(VertexId(7).index(), 7);
        assert_eq!(EdgeId(3).index(), 3);
        assert_eq!(FacetId(0).index(), 0);
        assert_eq!(ElementId(42).index(), 42);
        assert_eq!(TentId(u32::MAX).index(), u32::MAX as usize);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(VertexId(5).to_string(), "5");
        assert_eq!(TentId(12).to_string(), "12");
    }

    #[test]
    fn ordering_follows_raw_value() {
        let mut ids = vec![TentId(3), TentId(1), TentId(2)];
        ids.sort();
        assert_eq!(ids, vec![TentId(1), TentId(2), TentId(3)]);
        assert!(VertexId::from(1) < VertexId::from(2));
    }
}
