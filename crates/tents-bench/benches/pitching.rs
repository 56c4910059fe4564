//! Criterion benchmarks for pitching one slab with each strategy.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use tents_bench::{reference_profile, stress_profile, BenchProfile};
use tents_mesh::WaveSpeedField;
use tents_pitch::{PitchConfig, PitchingMethod, TentPitchedSlab};
use tents_test_utils::{jitter_offsets, jittered_square};

fn bench_profile(c: &mut Criterion, name: &str, profile: BenchProfile) {
    let BenchProfile {
        graph,
        speeds,
        dt,
        config,
    } = profile;
    let graph = Arc::new(graph);
    let mut slab = TentPitchedSlab::new(graph, config).unwrap();
    c.bench_function(name, |b| {
        b.iter(|| {
            slab.pitch_tents(black_box(dt), &speeds).unwrap();
            black_box(slab.n_tents());
        });
    });
}

/// Benchmark: 32×32 square, volume-gradient and edge-gradient.
fn bench_square(c: &mut Criterion) {
    for method in [PitchingMethod::VolumeGradient, PitchingMethod::EdgeGradient] {
        let profile = reference_profile(PitchConfig::with_method(method));
        bench_profile(c, &format!("pitch_square_32_{method}"), profile);
    }
}

/// Benchmark: 8×8×8 cube with the volume-gradient method.
fn bench_cube(c: &mut Criterion) {
    let profile = stress_profile(PitchConfig::default());
    bench_profile(c, "pitch_cube_8_vol", profile);
}

/// Benchmark: jittered 32×32 square with the edge-gradient method.
fn bench_jittered(c: &mut Criterion) {
    let offsets = jitter_offsets(2 * 31 * 31, 42);
    let profile = BenchProfile {
        graph: jittered_square(32, &offsets),
        speeds: WaveSpeedField::Constant(1.0),
        dt: 0.05,
        config: PitchConfig::with_method(PitchingMethod::EdgeGradient),
    };
    bench_profile(c, "pitch_jittered_32_edge", profile);
}

criterion_group!(benches, bench_square, bench_cube, bench_jittered);
criterion_main!(benches);
