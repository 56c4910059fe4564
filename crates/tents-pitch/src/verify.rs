//! Post-hoc invariant checks for a pitched slab.
//!
//! These re-derive every guarantee the front loop is meant to provide
//! from the finished tents alone. Tests and downstream consumers can run
//! them on any slab; they never mutate it.

use std::fmt;

use tents_core::{norm, ElementId, TentId, VertexId};

use crate::slab::TentPitchedSlab;

/// Relative slack on the causality bound, absorbing rounding in the
/// pole-height root.
pub const CAUSALITY_RTOL: f64 = 1e-8;

/// A broken slab invariant.
#[derive(Clone, Debug, PartialEq)]
pub enum InvariantViolation {
    /// A front gradient exceeds `1 / c` on one of a tent's elements.
    Acausal {
        /// The offending tent.
        tent: TentId,
        /// The element where the bound is exceeded.
        element: ElementId,
        /// Measured gradient norm.
        slope: f64,
        /// The bound `1 / c`.
        bound: f64,
    },
    /// A vertex did not reach `bottom + dt`.
    Incomplete {
        /// The vertex.
        vertex: VertexId,
        /// Its final time.
        reached: f64,
        /// The time it should have reached.
        target: f64,
    },
    /// A tent's time interval does not continue where the previous tent
    /// at the same vertex ended.
    Gap {
        /// The offending tent.
        tent: TentId,
        /// Expected bottom time.
        expected: f64,
        /// Actual bottom time.
        got: f64,
    },
    /// A dependency does not have a strictly lower level, or points
    /// forward in pitch order.
    LevelOrder {
        /// The dependent tent.
        tent: TentId,
        /// Its dependency.
        dependency: TentId,
    },
    /// The dependency table has a cycle.
    Cyclic,
    /// Periodic twins disagree on times, level, or dependencies, or do
    /// not link back to each other.
    TwinMismatch {
        /// The tent.
        tent: TentId,
        /// The disagreeing twin.
        twin: TentId,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acausal {
                tent,
                element,
                slope,
                bound,
            } => write!(
                f,
                "tent {tent} has slope {slope} > {bound} on element {element}"
            ),
            Self::Incomplete {
                vertex,
                reached,
                target,
            } => write!(f, "vertex {vertex} reached {reached}, expected {target}"),
            Self::Gap {
                tent,
                expected,
                got,
            } => write!(f, "tent {tent} starts at {got}, expected {expected}"),
            Self::LevelOrder { tent, dependency } => write!(
                f,
                "tent {tent} depends on tent {dependency} without a lower level"
            ),
            Self::Cyclic => write!(f, "dependency table has a cycle"),
            Self::TwinMismatch { tent, twin } => {
                write!(f, "tent {tent} and periodic twin {twin} disagree")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Every bottom and top gradient obeys `|∇φ| ≤ 1/c` on its element.
pub fn check_causality(slab: &TentPitchedSlab) -> Result<(), InvariantViolation> {
    let speeds = slab.element_speeds();
    for (i, tent) in slab.tents().iter().enumerate() {
        for (k, &e) in tent.elements().iter().enumerate() {
            let bound = 1.0 / speeds[e.index()];
            for g in [tent.gradphi_bot(k), tent.gradphi_top(k)] {
                let slope = norm(&g);
                if slope > bound * (1.0 + CAUSALITY_RTOL) + 1e-12 {
                    return Err(InvariantViolation::Acausal {
                        tent: TentId(i as u32),
                        element: e,
                        slope,
                        bound,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Tents at each vertex stack without gaps from the bottom front to the
/// top, and the top is `bottom + dt` everywhere.
pub fn check_progress(slab: &TentPitchedSlab) -> Result<(), InvariantViolation> {
    let mut reached = slab.front_bottom().to_vec();
    for (i, tent) in slab.tents().iter().enumerate() {
        let v = tent.vertex().index();
        if tent.tbot() != reached[v] {
            return Err(InvariantViolation::Gap {
                tent: TentId(i as u32),
                expected: reached[v],
                got: tent.tbot(),
            });
        }
        reached[v] = tent.ttop();
    }
    for (v, (&r, &b)) in reached.iter().zip(slab.front_bottom()).enumerate() {
        let target = b + slab.slab_height();
        if r != target || slab.front_top()[v] != target {
            return Err(InvariantViolation::Incomplete {
                vertex: VertexId(v as u32),
                reached: r,
                target,
            });
        }
    }
    Ok(())
}

/// Dependencies point backwards in pitch order to strictly lower levels,
/// and the table is acyclic.
pub fn check_dependencies(slab: &TentPitchedSlab) -> Result<(), InvariantViolation> {
    let table = slab.dependency_table();
    for i in 0..slab.n_tents() {
        let tent = TentId(i as u32);
        for &d in table.depends_on(tent) {
            if d >= tent || slab.tent(d).level() >= slab.tent(tent).level() {
                return Err(InvariantViolation::LevelOrder {
                    tent,
                    dependency: d,
                });
            }
        }
    }
    if !table.is_acyclic() {
        return Err(InvariantViolation::Cyclic);
    }
    Ok(())
}

/// Twin tents share times, level, and dependencies and list each other.
pub fn check_periodic_twins(slab: &TentPitchedSlab) -> Result<(), InvariantViolation> {
    let table = slab.dependency_table();
    for i in 0..slab.n_tents() {
        let id = TentId(i as u32);
        let tent = slab.tent(id);
        for &twin in tent.periodic_twins() {
            let other = slab.tent(twin);
            let agree = other.tbot() == tent.tbot()
                && other.ttop() == tent.ttop()
                && other.level() == tent.level()
                && table.depends_on(twin) == table.depends_on(id)
                && other.periodic_twins().contains(&id);
            if !agree {
                return Err(InvariantViolation::TwinMismatch { tent: id, twin });
            }
        }
    }
    Ok(())
}

/// Run every check.
pub fn check_all(slab: &TentPitchedSlab) -> Result<(), InvariantViolation> {
    check_causality(slab)?;
    check_progress(slab)?;
    check_dependencies(slab)?;
    check_periodic_twins(slab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PitchConfig;
    use tents_mesh::{Mesh, MeshGraph, WaveSpeedField};

    #[test]
    fn pitched_line_passes_every_check() {
        let graph = MeshGraph::non_periodic(Mesh::interval(0.0, 2.0, 8).unwrap());
        let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
        slab.pitch_tents(1.0, &WaveSpeedField::Constant(1.0)).unwrap();
        assert_eq!(check_all(&slab), Ok(()));
    }

    #[test]
    fn line_tents_saturate_the_bound() {
        let graph = MeshGraph::non_periodic(Mesh::interval(0.0, 2.0, 8).unwrap());
        let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
        slab.pitch_tents(1.0, &WaveSpeedField::Constant(1.0)).unwrap();
        // Tents pitched at c = 1 reach slope 1 somewhere.
        assert!((slab.max_slope() - 1.0).abs() < 1e-8);
    }

    #[test]
    fn empty_slab_is_trivially_valid() {
        let graph = MeshGraph::non_periodic(Mesh::interval(0.0, 1.0, 2).unwrap());
        let slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
        assert_eq!(check_causality(&slab), Ok(()));
        assert_eq!(check_dependencies(&slab), Ok(()));
        assert!(InvariantViolation::Cyclic.to_string().contains("cycle"));
    }
}
