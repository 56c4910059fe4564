//! Structured mesh builders.
//!
//! Uniform simplex meshes of intervals, rectangles, and boxes. Vertex ids
//! are lexicographic in the grid index with `x` varying fastest, which the
//! matching [`PeriodicMap`](crate::PeriodicMap) constructors rely on.

use crate::error::MeshError;
use crate::mesh::Mesh;

fn check_cells(name: &'static str, n: usize) -> Result<(), MeshError> {
    if n == 0 {
        return Err(MeshError::InvalidResolution {
            name,
            reason: "must be at least 1".into(),
        });
    }
    if n >= u32::MAX as usize / 8 {
        return Err(MeshError::InvalidResolution {
            name,
            reason: format!("{n} cells exceed the u32 vertex range"),
        });
    }
    Ok(())
}

fn check_extent(name: &'static str, lo: f64, hi: f64) -> Result<(), MeshError> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return Err(MeshError::InvalidResolution {
            name,
            reason: format!("extent [{lo}, {hi}] must be finite and non-empty"),
        });
    }
    Ok(())
}

impl Mesh {
    /// Uniform 1D mesh of `[a, b]` with `n` cells.
    ///
    /// Vertex `i` sits at `a + i * (b - a) / n`.
    ///
    /// ```
    /// use tents_mesh::Mesh;
    ///
    /// let mesh = Mesh::interval(0.0, 4.0, 4).unwrap();
    /// assert_eq!(mesh.n_vertices(), 5);
    /// assert_eq!(mesh.n_elements(), 4);
    /// ```
    pub fn interval(a: f64, b: f64, n: usize) -> Result<Self, MeshError> {
        check_cells("n", n)?;
        check_extent("interval", a, b)?;
        let h = (b - a) / n as f64;
        let points: Vec<f64> = (0..=n).map(|i| a + i as f64 * h).collect();
        Self::from_points_1d(&points)
    }

    /// 1D mesh through the given points, one segment per consecutive pair.
    ///
    /// Points are taken as given; coincident neighbours produce a
    /// degenerate segment that the pitcher rejects later.
    pub fn from_points_1d(points: &[f64]) -> Result<Self, MeshError> {
        if points.len() < 2 {
            return Err(MeshError::EmptyMesh);
        }
        let elements: Vec<[u32; 2]> = (0..points.len() as u32 - 1)
            .map(|i| [i, i + 1])
            .collect();
        Self::new(1, points.to_vec(), &elements)
    }

    /// Structured triangle mesh of `[x0, x1] × [y0, y1]`.
    ///
    /// Each of the `nx × ny` cells is split into two triangles along the
    /// diagonal from its lower-left to its upper-right corner. Vertex
    /// `(i, j)` has id `j * (nx + 1) + i`.
    pub fn rectangle(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        nx: usize,
        ny: usize,
    ) -> Result<Self, MeshError> {
        check_cells("nx", nx)?;
        check_cells("ny", ny)?;
        check_extent("x extent", x0, x1)?;
        check_extent("y extent", y0, y1)?;
        let (hx, hy) = ((x1 - x0) / nx as f64, (y1 - y0) / ny as f64);

        let mut coords = Vec::with_capacity(2 * (nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                coords.push(x0 + i as f64 * hx);
                coords.push(y0 + j as f64 * hy);
            }
        }

        let id = |i: usize, j: usize| (j * (nx + 1) + i) as u32;
        let mut elements = Vec::with_capacity(2 * nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let (v00, v10) = (id(i, j), id(i + 1, j));
                let (v01, v11) = (id(i, j + 1), id(i + 1, j + 1));
                elements.push([v00, v10, v11]);
                elements.push([v00, v11, v01]);
            }
        }
        Self::new(2, coords, &elements)
    }

    /// Unit square with `n × n` cells.
    pub fn unit_square(n: usize) -> Result<Self, MeshError> {
        Self::rectangle(0.0, 1.0, 0.0, 1.0, n, n)
    }

    /// Structured tetrahedral mesh of the box `lo..hi`.
    ///
    /// Each of the `nx × ny × nz` cubes is split into six Kuhn tetrahedra
    /// sharing the main diagonal, which makes neighbouring cubes conform.
    /// Vertex `(i, j, k)` has id `(k * (ny + 1) + j) * (nx + 1) + i`.
    pub fn cuboid(lo: [f64; 3], hi: [f64; 3], n: [usize; 3]) -> Result<Self, MeshError> {
        check_cells("nx", n[0])?;
        check_cells("ny", n[1])?;
        check_cells("nz", n[2])?;
        for axis in 0..3 {
            check_extent("box extent", lo[axis], hi[axis])?;
        }
        let h = [
            (hi[0] - lo[0]) / n[0] as f64,
            (hi[1] - lo[1]) / n[1] as f64,
            (hi[2] - lo[2]) / n[2] as f64,
        ];

        let mut coords = Vec::with_capacity(3 * (n[0] + 1) * (n[1] + 1) * (n[2] + 1));
        for k in 0..=n[2] {
            for j in 0..=n[1] {
                for i in 0..=n[0] {
                    coords.push(lo[0] + i as f64 * h[0]);
                    coords.push(lo[1] + j as f64 * h[1]);
                    coords.push(lo[2] + k as f64 * h[2]);
                }
            }
        }

        let id = |c: [usize; 3]| ((c[2] * (n[1] + 1) + c[1]) * (n[0] + 1) + c[0]) as u32;
        const AXIS_ORDERS: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let mut elements = Vec::with_capacity(6 * n[0] * n[1] * n[2]);
        for k in 0..n[2] {
            for j in 0..n[1] {
                for i in 0..n[0] {
                    for order in AXIS_ORDERS {
                        let mut corner = [i, j, k];
                        let mut tet = [id(corner); 4];
                        for (step, &axis) in order.iter().enumerate() {
                            corner[axis] += 1;
                            tet[step + 1] = id(corner);
                        }
                        elements.push(tet);
                    }
                }
            }
        }
        Self::new(3, coords, &elements)
    }

    /// Unit cube with `n × n × n` cells.
    pub fn unit_cube(n: usize) -> Result<Self, MeshError> {
        Self::cuboid([0.0; 3], [1.0; 3], [n, n, n])
    }
}
