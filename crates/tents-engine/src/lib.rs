//! Execution over pitched tents.
//!
//! A [`TentExecutor`] runs a closure once per tent of a
//! [`TentPitchedSlab`](tents_pitch::TentPitchedSlab), never starting a tent
//! before every tent it depends on has finished. Sequential runs follow
//! pitch order; parallel runs dispatch tents to a scoped worker pool as
//! their dependencies complete.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;

pub use config::{ExecConfig, ExecConfigError};
pub use error::ExecError;
pub use executor::TentExecutor;
pub use metrics::ExecMetrics;
