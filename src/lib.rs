//! alf: Apache LogFormat-driven access-log parser.
//!
//! The parsing core lives in [`alf_core`] and is re-exported here so that
//! integration tests and the binary import a single crate. This crate adds the
//! output layer used by the `alf` binary.
//!
//! # Architecture
//!
//! ```text
//! format + text ──► LogFile ──► records ──► render ──► stdout
//! ```

pub mod render;

pub use alf_core::*;
