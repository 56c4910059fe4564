//! Execution errors.

use std::error::Error;
use std::fmt;

use tents_core::TentId;

/// A run stopped because a tent could not be processed.
///
/// `E` is the error type of the user closure.
#[derive(Debug, PartialEq)]
pub enum ExecError<E> {
    /// The closure returned an error for `tent`.
    TentFailed {
        /// The failing tent.
        tent: TentId,
        /// The closure's error.
        source: E,
    },
    /// The closure panicked while processing `tent`.
    WorkerPanicked {
        /// The tent being processed.
        tent: TentId,
    },
}

impl<E> ExecError<E> {
    /// The tent that stopped the run.
    pub fn tent(&self) -> TentId {
        match self {
            Self::TentFailed { tent, .. } | Self::WorkerPanicked { tent } => *tent,
        }
    }
}

impl<E: fmt::Display> fmt::Display for ExecError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TentFailed { tent, source } => write!(f, "tent {tent} failed: {source}"),
            Self::WorkerPanicked { tent } => write!(f, "worker panicked on tent {tent}"),
        }
    }
}

impl<E: Error + 'static> Error for ExecError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TentFailed { source, .. } => Some(source),
            Self::WorkerPanicked { .. } => None,
        }
    }
}
