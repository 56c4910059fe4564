//! Per-run execution metrics.

/// Counters collected during one executor run.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecMetrics {
    /// Tents whose closure completed successfully.
    pub tents: usize,
    /// Worker threads used; 1 for sequential runs.
    pub workers: usize,
    /// Largest number of tents dispatched but not yet finished.
    pub peak_in_flight: usize,
    /// Wall-clock time of the run.
    pub elapsed_us: u64,
}
