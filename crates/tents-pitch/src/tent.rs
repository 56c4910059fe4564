//! The [`Tent`] record.

use std::fmt;

use smallvec::SmallVec;
use tents_core::{norm, ElementId, FacetId, TentId, Vec3, VertexId};

/// One spacetime macro-element: the region between two front surfaces
/// over the patch of elements around a central vertex.
///
/// Only the central vertex moves; every other vertex of the patch keeps
/// its time. Immutable once built; owned by its
/// [`TentPitchedSlab`](crate::TentPitchedSlab).
#[derive(Clone, Debug, PartialEq)]
pub struct Tent {
    pub(crate) vertex: VertexId,
    pub(crate) tbot: f64,
    pub(crate) ttop: f64,
    pub(crate) nbv: SmallVec<[VertexId; 8]>,
    pub(crate) nbtime: SmallVec<[f64; 8]>,
    pub(crate) els: SmallVec<[ElementId; 8]>,
    pub(crate) internal_facets: SmallVec<[FacetId; 8]>,
    pub(crate) elfnums: Vec<SmallVec<[usize; 3]>>,
    pub(crate) gradphi_bot: SmallVec<[Vec3; 8]>,
    pub(crate) gradphi_top: SmallVec<[Vec3; 8]>,
    pub(crate) level: u32,
    pub(crate) dependents: SmallVec<[TentId; 8]>,
    pub(crate) periodic_twins: SmallVec<[TentId; 1]>,
}

impl Tent {
    /// Central (raw) vertex.
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// Front time at the central vertex before the tent.
    pub fn tbot(&self) -> f64 {
        self.tbot
    }

    /// Front time at the central vertex after the tent.
    pub fn ttop(&self) -> f64 {
        self.ttop
    }

    /// `ttop - tbot`.
    pub fn height(&self) -> f64 {
        self.ttop - self.tbot
    }

    /// Neighbouring vertices of the central vertex, sorted.
    pub fn neighbours(&self) -> &[VertexId] {
        &self.nbv
    }

    /// Front times of [`neighbours`](Self::neighbours) while the tent is
    /// processed.
    pub fn neighbour_times(&self) -> &[f64] {
        &self.nbtime
    }

    /// Elements whose closure contains the central vertex.
    pub fn elements(&self) -> &[ElementId] {
        &self.els
    }

    /// Facets of the tent's elements that contain the central vertex.
    pub fn internal_facets(&self) -> &[FacetId] {
        &self.internal_facets
    }

    /// For element `k` of [`elements`](Self::elements), positions in
    /// [`internal_facets`](Self::internal_facets) of its internal facets.
    pub fn element_internal_facets(&self, k: usize) -> &[usize] {
        &self.elfnums[k]
    }

    /// Gradient of the bottom surface on element `k`.
    pub fn gradphi_bot(&self, k: usize) -> Vec3 {
        self.gradphi_bot[k]
    }

    /// Gradient of the top surface on element `k`.
    pub fn gradphi_top(&self, k: usize) -> Vec3 {
        self.gradphi_top[k]
    }

    /// Parallel layer: zero for tents with no dependencies.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Tents that must wait for this one.
    pub fn dependents(&self) -> &[TentId] {
        &self.dependents
    }

    /// Tents pitched together with this one at other periodic images of
    /// the same master vertex.
    pub fn periodic_twins(&self) -> &[TentId] {
        &self.periodic_twins
    }

    /// Steepest bottom or top gradient over the tent's elements.
    pub fn max_slope(&self) -> f64 {
        self.gradphi_bot
            .iter()
            .chain(&self.gradphi_top)
            .map(norm)
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Tent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tent at vertex {}: [{:.6}, {:.6}] level {}, {} elements, {} neighbours",
            self.vertex,
            self.tbot,
            self.ttop,
            self.level,
            self.els.len(),
            self.nbv.len()
        )
    }
}
