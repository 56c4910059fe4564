//! Affine simplex geometry: measures and barycentric gradients.
//!
//! A time surface over a tent is piecewise linear, `φ = Σ τ_j λ_j` on each
//! element, so its gradient is `Σ τ_j ∇λ_j`. Everything the pitcher needs
//! about element shape reduces to the constant gradients `∇λ_j`.

use smallvec::SmallVec;
use tents_core::{norm, ElementId, GeometryError, Vec3};

use crate::mesh::Mesh;

/// Relative determinant threshold below which an element counts as
/// degenerate.
const DEGENERACY_RTOL: f64 = 1e-12;

/// Shape data of one simplex element.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplexGeometry {
    measure: f64,
    diameter: f64,
    grad_lambda: SmallVec<[Vec3; 4]>,
}

impl SimplexGeometry {
    /// Length, area, or volume of the element.
    pub fn measure(&self) -> f64 {
        self.measure
    }

    /// Longest edge length.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Gradients of the barycentric coordinates, in local vertex order.
    pub fn grad_lambda(&self) -> &[Vec3] {
        &self.grad_lambda
    }

    /// Gradient of the linear function taking `values[j]` at local vertex `j`.
    pub fn gradient_of(&self, values: &[f64]) -> Vec3 {
        let mut g = [0.0; 3];
        for (value, grad) in values.iter().zip(&self.grad_lambda) {
            for (gc, dc) in g.iter_mut().zip(grad) {
                *gc += value * dc;
            }
        }
        g
    }

    /// Edge causality bound for unit wave speed.
    ///
    /// If every edge difference of a linear function is at most this value,
    /// its gradient norm is at most one: choosing the vertex with the
    /// largest `|∇λ|` as base, `|∇φ| ≤ max|Δτ| · (Σ|∇λ_i| − max|∇λ_i|)`.
    pub fn edge_bound(&self) -> f64 {
        let norms = self.grad_lambda.iter().map(norm);
        let (sum, max) = norms.fold((0.0, 0.0f64), |(s, m), n| (s + n, m.max(n)));
        1.0 / (sum - max)
    }
}

/// Compute the geometry of one element.
///
/// # Errors
///
/// [`GeometryError::DegenerateElement`] if the element's measure is zero
/// relative to its diameter.
pub fn element_geometry(mesh: &Mesh, element: ElementId) -> Result<SimplexGeometry, GeometryError> {
    let dim = mesh.dim();
    let verts = mesh.element_vertices(element);
    let x0 = mesh.point(verts[0]);

    // Columns of the Jacobian are the edge vectors from the first vertex.
    let mut jac = [[0.0f64; 3]; 3];
    for c in 0..dim {
        let xc = mesh.point(verts[c + 1]);
        for r in 0..dim {
            jac[r][c] = xc[r] - x0[r];
        }
    }

    let mut diameter = 0.0f64;
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            let (a, b) = (mesh.point(verts[i]), mesh.point(verts[j]));
            let len: f64 = a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum();
            diameter = diameter.max(len.sqrt());
        }
    }

    let det = determinant(&jac, dim);
    let factorial = [1.0, 1.0, 2.0, 6.0][dim];
    let measure = det.abs() / factorial;
    if !det.is_finite() || det.abs() <= DEGENERACY_RTOL * diameter.powi(dim as i32) {
        return Err(GeometryError::DegenerateElement { element, measure });
    }

    let inv = inverse(&jac, dim, det);
    let mut grad_lambda: SmallVec<[Vec3; 4]> = SmallVec::new();
    grad_lambda.push([0.0; 3]);
    for row in inv.iter().take(dim) {
        grad_lambda.push(*row);
        for c in 0..3 {
            grad_lambda[0][c] -= row[c];
        }
    }

    Ok(SimplexGeometry {
        measure,
        diameter,
        grad_lambda,
    })
}

/// Compute the geometry of every element, failing on the first degenerate
/// one.
pub fn mesh_geometry(mesh: &Mesh) -> Result<Vec<SimplexGeometry>, GeometryError> {
    (0..mesh.n_elements() as u32)
        .map(|e| element_geometry(mesh, ElementId(e)))
        .collect()
}

fn determinant(m: &[[f64; 3]; 3], dim: usize) -> f64 {
    match dim {
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        _ => {
            m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
                - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
        }
    }
}

/// Inverse of the leading `dim × dim` block by cofactors. Row `i` of the
/// result is the gradient of barycentric coordinate `i + 1`.
fn inverse(m: &[[f64; 3]; 3], dim: usize, det: f64) -> [[f64; 3]; 3] {
    let mut inv = [[0.0f64; 3]; 3];
    match dim {
        1 => inv[0][0] = 1.0 / det,
        2 => {
            inv[0][0] = m[1][1] / det;
            inv[0][1] = -m[0][1] / det;
            inv[1][0] = -m[1][0] / det;
            inv[1][1] = m[0][0] / det;
        }
        _ => {
            for (r, row) in inv.iter_mut().enumerate() {
                for (c, out) in row.iter_mut().enumerate() {
                    // adj(m)[r][c] = cofactor of m[c][r].
                    let (r1, r2) = other_two(c);
                    let (c1, c2) = other_two(r);
                    let minor = m[r1][c1] * m[r2][c2] - m[r1][c2] * m[r2][c1];
                    let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
                    *out = sign * minor / det;
                }
            }
        }
    }
    inv
}

fn other_two(i: usize) -> (usize, usize) {
    match i {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tents_core::dot;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn segment_gradients() {
        let mesh = Mesh::from_points_1d(&[1.0, 3.0]).unwrap();
        let g = element_geometry(&mesh, ElementId(0)).unwrap();
        assert!(close(g.measure(), 2.0));
        assert!(close(g.grad_lambda()[0][0], -0.5));
        assert!(close(g.grad_lambda()[1][0], 0.5));
        assert!(close(g.edge_bound(), 2.0));
    }

    #[test]
    fn triangle_gradients_reproduce_linear_functions() {
        let mesh = Mesh::new(2, vec![0.0, 0.0, 2.0, 0.5, 0.3, 1.7], &[[0u32, 1, 2]]).unwrap();
        let g = element_geometry(&mesh, ElementId(0)).unwrap();
        // φ(x, y) = 3x - 2y + 1 sampled at the vertices.
        let values: Vec<f64> = (0..3u32)
            .map(|v| {
                let p = mesh.point(tents_core::VertexId(v));
                3.0 * p[0] - 2.0 * p[1] + 1.0
            })
            .collect();
        let grad = g.gradient_of(&values);
        assert!(close(grad[0], 3.0));
        assert!(close(grad[1], -2.0));
        assert_eq!(grad[2], 0.0);
    }

    #[test]
    fn tetrahedron_gradients_sum_to_zero() {
        let mesh = Mesh::unit_cube(1).unwrap();
        for e in 0..mesh.n_elements() as u32 {
            let g = element_geometry(&mesh, ElementId(e)).unwrap();
            assert!(close(g.measure(), 1.0 / 6.0));
            let mut sum = [0.0; 3];
            for grad in g.grad_lambda() {
                for c in 0..3 {
                    sum[c] += grad[c];
                }
            }
            assert!(dot(&sum, &sum) < 1e-20);
            let values = [0.0, 1.0, 2.0, 3.0];
            // Linear in the Kuhn path: every tet sees φ = x + y + z.
            let grad = g.gradient_of(&values);
            assert!(close(grad[0], 1.0) && close(grad[1], 1.0) && close(grad[2], 1.0));
        }
    }

    #[test]
    fn degenerate_segment_is_rejected() {
        let mesh = Mesh::from_points_1d(&[0.0, 1.0, 1.0]).unwrap();
        assert!(element_geometry(&mesh, ElementId(0)).is_ok());
        assert!(matches!(
            element_geometry(&mesh, ElementId(1)),
            Err(GeometryError::DegenerateElement { element: ElementId(1), .. })
        ));
        assert!(mesh_geometry(&mesh).is_err());
    }

    #[test]
    fn collinear_triangle_is_rejected() {
        let mesh = Mesh::new(2, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0], &[[0u32, 1, 2]]).unwrap();
        assert!(matches!(
            element_geometry(&mesh, ElementId(0)),
            Err(GeometryError::DegenerateElement { .. })
        ));
    }

    #[test]
    fn right_triangle_edge_bound() {
        let mesh = Mesh::unit_square(1).unwrap();
        let g = element_geometry(&mesh, ElementId(0)).unwrap();
        // Gradient norms 1, √2, 1 → bound 1 / (2 + √2 − √2) = 1/2.
        assert!(close(g.edge_bound(), 0.5));
    }
}
