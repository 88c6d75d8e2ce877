//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `eventpost` crate.
//!
//! It holds the crate-wide error type and the tracing subscriber setup used
//! by the command-line binary.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
