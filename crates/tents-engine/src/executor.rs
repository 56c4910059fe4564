//! Dependency-respecting tent execution.
//!
//! The parallel path keeps all scheduling state on the calling thread:
//! per-tent counters of unfinished dependencies, a task channel feeding a
//! scoped worker pool, and a completion channel back. A tent is sent to
//! the pool once its counter reaches zero. Workers only run the closure
//! and report the outcome, so a failing or panicking closure can never
//! leave the coordinator waiting on a tent that will not finish.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use tents_core::TentId;
use tents_pitch::{Tent, TentPitchedSlab};
use tracing::{debug, warn};

use crate::config::{ExecConfig, ExecConfigError};
use crate::error::ExecError;
use crate::metrics::ExecMetrics;

/// Result a worker sends back for one tent.
enum Outcome<E> {
    Done,
    Failed(E),
    Panicked,
}

/// Runs a closure over every tent of a slab in dependency order.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tents_engine::{ExecConfig, TentExecutor};
/// use tents_mesh::{Mesh, MeshGraph, WaveSpeedField};
/// use tents_pitch::{PitchConfig, TentPitchedSlab};
///
/// let graph = MeshGraph::non_periodic(Mesh::interval(0.0, 4.0, 4).unwrap());
/// let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
/// slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
///
/// let visited = AtomicUsize::new(0);
/// let mut exec = TentExecutor::new(ExecConfig::with_workers(2)).unwrap();
/// exec.run_parallel(&slab, |_, _| {
///     visited.fetch_add(1, Ordering::Relaxed);
///     Ok::<(), std::convert::Infallible>(())
/// })
/// .unwrap();
/// assert_eq!(visited.into_inner(), 5);
/// assert_eq!(exec.metrics().tents, 5);
/// ```
#[derive(Debug)]
pub struct TentExecutor {
    config: ExecConfig,
    metrics: ExecMetrics,
}

impl TentExecutor {
    /// An executor with the given configuration.
    pub fn new(config: ExecConfig) -> Result<Self, ExecConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            metrics: ExecMetrics::default(),
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Metrics of the most recent run.
    pub fn metrics(&self) -> &ExecMetrics {
        &self.metrics
    }

    /// Run `f` on every tent in pitch order on the calling thread.
    ///
    /// Stops at the first error or panic.
    pub fn run_sequential<F, E>(
        &mut self,
        slab: &TentPitchedSlab,
        mut f: F,
    ) -> Result<(), ExecError<E>>
    where
        F: FnMut(TentId, &Tent) -> Result<(), E>,
    {
        let start = Instant::now();
        self.metrics = ExecMetrics {
            workers: 1,
            ..ExecMetrics::default()
        };
        debug!(tents = slab.n_tents(), "sequential run started");

        let mut result = Ok(());
        for (i, tent) in slab.tents().iter().enumerate() {
            let id = TentId(i as u32);
            self.metrics.peak_in_flight = 1;
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| f(id, tent))) {
                Ok(Ok(())) => Outcome::Done,
                Ok(Err(e)) => Outcome::Failed(e),
                Err(_) => Outcome::Panicked,
            };
            match into_error(id, outcome) {
                None => self.metrics.tents += 1,
                Some(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        self.metrics.elapsed_us = start.elapsed().as_micros() as u64;
        debug!(
            tents = self.metrics.tents,
            elapsed_us = self.metrics.elapsed_us,
            "sequential run finished"
        );
        result
    }

    /// Run `f` on every tent using a pool of worker threads.
    ///
    /// A tent is dispatched only after all of its dependencies finished.
    /// After the first failure no new tents are dispatched; tents already
    /// running are allowed to finish and the first error is returned.
    pub fn run_parallel<F, E>(&mut self, slab: &TentPitchedSlab, f: F) -> Result<(), ExecError<E>>
    where
        F: Fn(TentId, &Tent) -> Result<(), E> + Sync,
        E: Send,
    {
        let start = Instant::now();
        let n = slab.n_tents();
        let workers = self.config.resolved_worker_count().min(n.max(1));
        self.metrics = ExecMetrics {
            workers,
            ..ExecMetrics::default()
        };
        debug!(tents = n, workers, "parallel run started");

        let result = std::thread::scope(|s| {
            let (task_tx, task_rx) = crossbeam_channel::unbounded::<TentId>();
            let (done_tx, done_rx) = crossbeam_channel::unbounded::<(TentId, Outcome<E>)>();
            for _ in 0..workers {
                let task_rx = task_rx.clone();
                let done_tx = done_tx.clone();
                let f = &f;
                s.spawn(move || worker_loop(slab, f, task_rx, done_tx));
            }
            drop(task_rx);
            drop(done_tx);

            let result = coordinate(slab, &task_tx, &done_rx, &mut self.metrics);
            // Closing the task channel lets idle workers exit.
            drop(task_tx);
            result
        });

        self.metrics.elapsed_us = start.elapsed().as_micros() as u64;
        debug!(
            tents = self.metrics.tents,
            peak_in_flight = self.metrics.peak_in_flight,
            elapsed_us = self.metrics.elapsed_us,
            "parallel run finished"
        );
        result
    }
}

fn worker_loop<F, E>(
    slab: &TentPitchedSlab,
    f: &F,
    task_rx: Receiver<TentId>,
    done_tx: Sender<(TentId, Outcome<E>)>,
) where
    F: Fn(TentId, &Tent) -> Result<(), E>,
{
    while let Ok(id) = task_rx.recv() {
        let tent = slab.tent(id);
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| f(id, tent))) {
            Ok(Ok(())) => Outcome::Done,
            Ok(Err(e)) => Outcome::Failed(e),
            Err(_) => Outcome::Panicked,
        };
        if done_tx.send((id, outcome)).is_err() {
            break;
        }
    }
}

fn coordinate<E>(
    slab: &TentPitchedSlab,
    task_tx: &Sender<TentId>,
    done_rx: &Receiver<(TentId, Outcome<E>)>,
    metrics: &mut ExecMetrics,
) -> Result<(), ExecError<E>> {
    let table = slab.dependency_table();
    let mut remaining: Vec<usize> = (0..slab.n_tents())
        .map(|i| table.depends_on(TentId(i as u32)).len())
        .collect();
    let mut in_flight = 0usize;
    let mut first_error: Option<ExecError<E>> = None;

    for root in table.roots() {
        if task_tx.send(root).is_ok() {
            in_flight += 1;
        }
    }
    metrics.peak_in_flight = in_flight;

    while in_flight > 0 {
        let Ok((id, outcome)) = done_rx.recv() else {
            break;
        };
        in_flight -= 1;
        match into_error(id, outcome) {
            None => {
                metrics.tents += 1;
                if first_error.is_some() {
                    continue;
                }
                for &d in table.dependents(id) {
                    remaining[d.index()] -= 1;
                    if remaining[d.index()] == 0 && task_tx.send(d).is_ok() {
                        in_flight += 1;
                    }
                }
                metrics.peak_in_flight = metrics.peak_in_flight.max(in_flight);
            }
            Some(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Map a worker outcome to the run error it causes, if any.
fn into_error<E>(tent: TentId, outcome: Outcome<E>) -> Option<ExecError<E>> {
    match outcome {
        Outcome::Done => None,
        Outcome::Failed(source) => {
            warn!(tent = %tent, "tent closure failed");
            Some(ExecError::TentFailed { tent, source })
        }
        Outcome::Panicked => {
            warn!(tent = %tent, "tent closure panicked");
            Some(ExecError::WorkerPanicked { tent })
        }
    }
}
