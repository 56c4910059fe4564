//! Wave-speed bounds per element.

use std::fmt;
use std::sync::Arc;

use tents_core::{ElementId, GeometryError};

use crate::mesh::Mesh;

/// Pointwise wave-speed function, evaluated at physical coordinates.
pub type SpeedFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Maximal characteristic wave speed, the `c` in the causality bound
/// `|∇φ| ≤ 1/c`.
///
/// Speeds are resolved to one bound per element before pitching. A
/// function is sampled at the element's vertices and centroid and the
/// largest sample is taken, which is exact for piecewise-linear speeds.
#[derive(Clone)]
pub enum WaveSpeedField {
    /// One speed for the whole mesh.
    Constant(f64),
    /// One speed per element, indexed by element id.
    PerElement(Vec<f64>),
    /// A speed function of position.
    Function(SpeedFn),
}

impl WaveSpeedField {
    /// Wrap a closure as a speed field.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Resolve the field to one positive bound per element.
    ///
    /// # Errors
    ///
    /// [`GeometryError::WaveSpeedCount`] if a per-element table has the
    /// wrong length, [`GeometryError::NonPositiveWaveSpeed`] if any bound
    /// is zero, negative, or not finite.
    pub fn element_speeds(&self, mesh: &Mesh) -> Result<Vec<f64>, GeometryError> {
        let n = mesh.n_elements();
        let speeds = match self {
            Self::Constant(c) => vec![*c; n],
            Self::PerElement(cs) => {
                if cs.len() != n {
                    return Err(GeometryError::WaveSpeedCount {
                        expected: n,
                        got: cs.len(),
                    });
                }
                cs.clone()
            }
            Self::Function(f) => (0..n as u32)
                .map(|e| sample_element(mesh, ElementId(e), f.as_ref()))
                .collect(),
        };
        for (e, &speed) in speeds.iter().enumerate() {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(GeometryError::NonPositiveWaveSpeed {
                    element: ElementId(e as u32),
                    speed,
                });
            }
        }
        Ok(speeds)
    }
}

fn sample_element(mesh: &Mesh, e: ElementId, f: &(dyn Fn(&[f64]) -> f64 + Send + Sync)) -> f64 {
    let verts = mesh.element_vertices(e);
    let mut centroid = vec![0.0; mesh.dim()];
    let mut max = f64::NEG_INFINITY;
    for &v in verts {
        let p = mesh.point(v);
        max = max_propagating_nan(max, f(p));
        for (c, x) in centroid.iter_mut().zip(p) {
            *c += x / verts.len() as f64;
        }
    }
    max_propagating_nan(max, f(&centroid))
}

// `f64::max` drops NaN; a NaN sample must surface as an invalid speed.
fn max_propagating_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

impl From<f64> for WaveSpeedField {
    fn from(c: f64) -> Self {
        Self::Constant(c)
    }
}

impl fmt::Debug for WaveSpeedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => f.debug_tuple("Constant").field(c).finish(),
            Self::PerElement(cs) => f.debug_tuple("PerElement").field(&cs.len()).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
