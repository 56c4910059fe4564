//! Reusable meshes and wave speeds.
//!
//! - [`uniform_line`], [`periodic_line`], [`line_through`]: 1D meshes
//! - [`line_with_tiny_cell`]: one short cell among long ones, which forces
//!   the front to take many small steps near it
//! - [`square`], [`periodic_square`], [`jittered_square`]: 2D meshes
//! - [`cube`]: structured Kuhn tetrahedra
//! - [`ramp_speed`], [`alternating_speeds`]: variable wave speeds
//! - [`jitter_offsets`]: deterministic input for [`jittered_square`]

use tents_mesh::{Mesh, MeshGraph, PeriodicMap, WaveSpeedField};

/// `n` cells of width `h` starting at zero.
pub fn uniform_line(n: usize, h: f64) -> MeshGraph {
    let mesh = Mesh::interval(0.0, n as f64 * h, n).expect("valid interval");
    MeshGraph::non_periodic(mesh)
}

/// `n` cells of width `h` with the ends identified.
pub fn periodic_line(n: usize, h: f64) -> MeshGraph {
    let mesh = Mesh::interval(0.0, n as f64 * h, n).expect("valid interval");
    let map = PeriodicMap::interval(n).expect("valid periodic map");
    MeshGraph::new(mesh, map).expect("periodic interval needs at least 2 cells")
}

/// 1D mesh through consecutive cells of the given widths.
pub fn line_through(widths: &[f64]) -> MeshGraph {
    let mut points = Vec::with_capacity(widths.len() + 1);
    points.push(0.0);
    for w in widths {
        let last = points[points.len() - 1];
        points.push(last + w);
    }
    MeshGraph::non_periodic(Mesh::from_points_1d(&points).expect("at least one cell"))
}

/// `n` cells of width `h`, except the middle one, which has width `tiny`.
pub fn line_with_tiny_cell(n: usize, h: f64, tiny: f64) -> MeshGraph {
    let mut widths = vec![h; n];
    widths[n / 2] = tiny;
    line_through(&widths)
}

/// Unit square with `n × n` cells, two right triangles each.
pub fn square(n: usize) -> MeshGraph {
    MeshGraph::non_periodic(Mesh::unit_square(n).expect("valid square"))
}

/// Unit square with `n × n` cells, periodic in both directions.
pub fn periodic_square(n: usize) -> MeshGraph {
    let mesh = Mesh::unit_square(n).expect("valid square");
    let map = PeriodicMap::rectangle(n, n, true, true).expect("valid periodic map");
    MeshGraph::new(mesh, map).expect("periodic square needs at least 2 cells per side")
}

/// Unit square with `n × n` cells whose interior vertices are shifted.
///
/// `offsets` supplies values in `[-1, 1]`, consumed two per interior
/// vertex and cycled if short; each is scaled to at most 15% of the cell
/// width, which keeps every triangle positively oriented.
pub fn jittered_square(n: usize, offsets: &[f64]) -> MeshGraph {
    let h = 1.0 / n as f64;
    let mut coords = Vec::with_capacity(2 * (n + 1) * (n + 1));
    let mut k = 0;
    for j in 0..=n {
        for i in 0..=n {
            let (mut x, mut y) = (i as f64 * h, j as f64 * h);
            let interior = i > 0 && i < n && j > 0 && j < n;
            if interior && !offsets.is_empty() {
                x += 0.15 * h * offsets[k % offsets.len()].clamp(-1.0, 1.0);
                y += 0.15 * h * offsets[(k + 1) % offsets.len()].clamp(-1.0, 1.0);
                k += 2;
            }
            coords.push(x);
            coords.push(y);
        }
    }
    let id = |i: usize, j: usize| (j * (n + 1) + i) as u32;
    let mut elements = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            elements.push([id(i, j), id(i + 1, j), id(i + 1, j + 1)]);
            elements.push([id(i, j), id(i + 1, j + 1), id(i, j + 1)]);
        }
    }
    MeshGraph::non_periodic(Mesh::new(2, coords, &elements).expect("valid jittered square"))
}

/// `n` pseudo-random values in `[-1, 1]` derived from `seed`.
pub fn jitter_offsets(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
        })
        .collect()
}

/// Unit cube with `n × n × n` cells, six tetrahedra each.
pub fn cube(n: usize) -> MeshGraph {
    MeshGraph::non_periodic(Mesh::unit_cube(n).expect("valid cube"))
}

/// Wave speed `1 + x`, growing along the first axis.
pub fn ramp_speed() -> WaveSpeedField {
    WaveSpeedField::from_fn(|x| 1.0 + x[0])
}

/// Per-element speeds alternating between `slow` and `fast`.
pub fn alternating_speeds(graph: &MeshGraph, slow: f64, fast: f64) -> WaveSpeedField {
    let n = graph.mesh().n_elements();
    WaveSpeedField::PerElement((0..n).map(|e| if e % 2 == 0 { slow } else { fast }).collect())
}
