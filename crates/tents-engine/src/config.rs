//! Executor configuration.

use std::fmt;

/// Upper bound on worker threads.
pub const MAX_WORKERS: usize = 64;

/// Configuration for a [`TentExecutor`](crate::TentExecutor).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecConfig {
    /// Number of worker threads for parallel runs. `None` = auto-detect
    /// from `available_parallelism`.
    pub worker_count: Option<usize>,
}

impl ExecConfig {
    /// A configuration with a fixed worker count.
    pub fn with_workers(n: usize) -> Self {
        Self {
            worker_count: Some(n),
        }
    }

    /// Resolve the worker count, clamped to `[1, MAX_WORKERS]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, MAX_WORKERS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, MAX_WORKERS),
        }
    }

    /// Reject explicit worker counts outside `[1, MAX_WORKERS]`.
    pub fn validate(&self) -> Result<(), ExecConfigError> {
        match self.worker_count {
            Some(n) if n == 0 || n > MAX_WORKERS => {
                Err(ExecConfigError::InvalidWorkerCount { value: n })
            }
            _ => Ok(()),
        }
    }
}

// ── ExecConfigError ────────────────────────────────────────────────

/// Errors detected during [`ExecConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecConfigError {
    /// Explicit worker count is zero or above [`MAX_WORKERS`].
    InvalidWorkerCount {
        /// The configured value.
        value: usize,
    },
}

impl fmt::Display for ExecConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkerCount { value } => {
                write!(f, "worker count {value} outside [1, {MAX_WORKERS}]")
            }
        }
    }
}

impl std::error::Error for ExecConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_worker_count_clamps_zero() {
        assert_eq!(ExecConfig::with_workers(0).resolved_worker_count(), 1);
    }

    #[test]
    fn resolved_worker_count_clamps_large() {
        assert_eq!(ExecConfig::with_workers(200).resolved_worker_count(), 64);
    }

    #[test]
    fn auto_detect_is_in_range() {
        let n = ExecConfig::default().resolved_worker_count();
        assert!((1..=MAX_WORKERS).contains(&n));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(ExecConfig::default().validate(), Ok(()));
        assert_eq!(ExecConfig::with_workers(8).validate(), Ok(()));
        assert_eq!(
            ExecConfig::with_workers(0).validate(),
            Err(ExecConfigError::InvalidWorkerCount { value: 0 })
        );
        assert!(ExecConfig::with_workers(65)
            .validate()
            .unwrap_err()
            .to_string()
            .contains("65"));
    }
}
