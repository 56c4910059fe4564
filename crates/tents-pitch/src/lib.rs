//! Advancing-front tent pitching.
//!
//! Given a mesh and wave-speed bounds, [`TentPitchedSlab::pitch_tents`]
//! greedily advances a time front one vertex at a time. Each step pitches a
//! [`Tent`] whose top surface still satisfies the causality bound
//! `|∇φ| ≤ 1/c`, and records which earlier tents it depends on.
//!
//! # Strategies
//!
//! - [`VolumeGradientPitcher`]: exact per-element bound
//! - [`EdgeGradientPitcher`]: cheaper per-edge bound
//!
//! Custom strategies implement [`PoleHeightStrategy`] and are passed to
//! [`TentPitchedSlab::with_strategy`].
//!
//! # Invariants
//!
//! The [`verify`] module re-checks causality, progress, dependency order,
//! and periodic twin consistency on any finished slab.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dag;
pub mod edge;
pub mod error;
pub mod front;
pub mod pitcher;
pub mod slab;
pub mod strategy;
pub mod tent;
pub mod verify;
pub mod volume;

pub use config::{PitchConfig, PitchingMethod};
pub use dag::DependencyTable;
pub use edge::EdgeGradientPitcher;
pub use error::{ConfigError, PitchError};
pub use front::FrontState;
pub use pitcher::TentSlabPitcher;
pub use slab::{PitchStats, TentPitchedSlab};
pub use strategy::{MeshData, PoleHeightStrategy};
pub use tent::Tent;
pub use volume::{VolumeGradientPitcher, VOLUME_FILL};
