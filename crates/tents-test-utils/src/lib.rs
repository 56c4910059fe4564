//! Test fixtures for tent pitching.
//!
//! Ready-made meshes (uniform, graded, jittered, periodic) and wave-speed
//! fields shared by the unit, integration, and property tests of the
//! workspace. Fixtures panic on invalid parameters; they are meant for
//! tests only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
