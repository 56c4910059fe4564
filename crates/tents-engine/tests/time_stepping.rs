//! Integration test: marching several slabs and consuming each in parallel.
//!
//! Each tent adds its height to a per-vertex clock. Because tents at a
//! vertex stack without gaps, every clock must end at the total time
//! marched, regardless of worker count or scheduling.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use tents_engine::{ExecConfig, TentExecutor};
use tents_mesh::WaveSpeedField;
use tents_pitch::{PitchConfig, PitchingMethod, TentPitchedSlab};
use tents_test_utils::{line_through, periodic_square, ramp_speed, square};

fn march(
    slab: &mut TentPitchedSlab,
    exec: &mut TentExecutor,
    slabs: usize,
    dt: f64,
    speeds: &WaveSpeedField,
) -> Vec<f64> {
    let n = slab.graph().mesh().n_vertices();
    let clocks = Mutex::new(vec![0.0; n]);
    let mut bottom = vec![0.0; n];
    for _ in 0..slabs {
        slab.pitch_tents_from(&bottom, dt, speeds).unwrap();
        exec.run_parallel(slab, |_, tent| {
            clocks.lock().unwrap()[tent.vertex().index()] += tent.height();
            Ok::<(), ()>(())
        })
        .unwrap();
        bottom = slab.front_top().to_vec();
    }
    clocks.into_inner().unwrap()
}

#[test]
fn clocks_reach_total_time_on_a_square() {
    let mut slab = TentPitchedSlab::new(square(4), PitchConfig::default()).unwrap();
    let mut exec = TentExecutor::new(ExecConfig::with_workers(4)).unwrap();
    let clocks = march(&mut slab, &mut exec, 3, 0.2, &ramp_speed());
    for c in clocks {
        assert!((c - 0.6).abs() < 1e-12, "clock at {c}");
    }
}

#[test]
fn periodic_images_are_all_visited() {
    let graph = Arc::new(periodic_square(3));
    let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
    let mut exec = TentExecutor::new(ExecConfig::with_workers(3)).unwrap();
    let clocks = march(&mut slab, &mut exec, 2, 0.25, &WaveSpeedField::Constant(1.0));
    for c in clocks {
        assert!((c - 0.5).abs() < 1e-12, "clock at {c}");
    }
}

#[test]
fn sequential_and_parallel_visit_the_same_tents() {
    let mut slab = TentPitchedSlab::new(
        square(3),
        PitchConfig::with_method(PitchingMethod::EdgeGradient),
    )
    .unwrap();
    slab.pitch_tents(0.4, &WaveSpeedField::Constant(1.0)).unwrap();

    let mut seq = Vec::new();
    let mut exec = TentExecutor::new(ExecConfig::with_workers(1)).unwrap();
    exec.run_sequential(&slab, |id, _| {
        seq.push(id);
        Ok::<(), ()>(())
    })
    .unwrap();

    let par = Mutex::new(Vec::new());
    let mut exec = TentExecutor::new(ExecConfig::with_workers(8)).unwrap();
    exec.run_parallel(&slab, |id, _| {
        par.lock().unwrap().push(id);
        Ok::<(), ()>(())
    })
    .unwrap();
    let mut par = par.into_inner().unwrap();
    par.sort();
    assert_eq!(seq, par);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parallel_runs_respect_dependencies(
        widths in prop::collection::vec(0.05f64..1.0, 1..12),
        dt in 0.1f64..1.5,
        workers in 1usize..6,
    ) {
        let mut slab = TentPitchedSlab::new(line_through(&widths), PitchConfig::default()).unwrap();
        slab.pitch_tents(dt, &WaveSpeedField::Constant(1.0)).unwrap();
        let done: Vec<AtomicBool> = (0..slab.n_tents()).map(|_| AtomicBool::new(false)).collect();
        let early = AtomicUsize::new(0);
        let table = slab.dependency_table();
        let mut exec = TentExecutor::new(ExecConfig::with_workers(workers)).unwrap();
        exec.run_parallel(&slab, |id, _| {
            if table.depends_on(id).iter().any(|d| !done[d.index()].load(Ordering::Acquire)) {
                early.fetch_add(1, Ordering::Relaxed);
            }
            done[id.index()].store(true, Ordering::Release);
            Ok::<(), ()>(())
        })
        .unwrap();
        prop_assert_eq!(early.load(Ordering::Relaxed), 0);
        prop_assert_eq!(exec.metrics().tents, slab.n_tents());
        prop_assert!(exec.metrics().workers <= workers);
    }
}
