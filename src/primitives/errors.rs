//! Error types for meshfree weight accumulation.
//!
//! ## Purpose
//!
//! This module defines `MeshfreeError`, the single error type returned by
//! construction-time validation and by the per-target accumulation calls.
//!
//! ## Design notes
//!
//! * **Configuration errors only**: An under-determined stencil is not an error
//!   (it yields zero weights), and a singular moment matrix is reported through
//!   `StencilStatus`, not through this type.
//! * **No-std friendly**: `std::error::Error` is only implemented with `std`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

/// Errors raised while configuring or invoking the accumulation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshfreeError {
    /// A per-particle configuration array has the wrong length.
    MismatchedLengths {
        /// Name of the offending array.
        what: &'static str,
        /// Length that was supplied.
        got: usize,
        /// Length required by the weight center or target count.
        expected: usize,
    },

    /// Spatial dimension outside `1..=3`.
    UnsupportedDimension(usize),

    /// `OperatorRegression` was requested without an operator.
    MissingOperator,

    /// A required builder parameter was never set.
    MissingParameter(&'static str),

    /// A particle index is outside its swarm.
    IndexOutOfBounds {
        /// Which swarm the index refers to.
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Number of addressable particles.
        len: usize,
    },

    /// Operator domain data does not match the domain tag.
    InvalidOperatorData(String),

    /// A smoothing tensor has the wrong shape or non-positive entries.
    InvalidSmoothing(String),

    /// The owned particle count exceeds the total particle count.
    InvalidOwnedCount {
        /// Requested owned count.
        owned: usize,
        /// Total number of particles.
        total: usize,
    },

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for MeshfreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshfreeError::MismatchedLengths { what, got, expected } => {
                write!(f, "Length mismatch: {} has {} entries, expected {}", what, got, expected)
            }
            MeshfreeError::UnsupportedDimension(d) => {
                write!(f, "Unsupported dimension: {} (must be 1, 2 or 3)", d)
            }
            MeshfreeError::MissingOperator => {
                write!(f, "Operator regression requires an operator")
            }
            MeshfreeError::MissingParameter(name) => {
                write!(f, "Missing required parameter: {}", name)
            }
            MeshfreeError::IndexOutOfBounds { what, index, len } => {
                write!(f, "Index out of bounds: {} index {} (len {})", what, index, len)
            }
            MeshfreeError::InvalidOperatorData(msg) => {
                write!(f, "Invalid operator data: {}", msg)
            }
            MeshfreeError::InvalidSmoothing(msg) => write!(f, "Invalid smoothing: {}", msg),
            MeshfreeError::InvalidOwnedCount { owned, total } => {
                write!(
                    f,
                    "Invalid owned count: {} (must not exceed {} particles)",
                    owned, total
                )
            }
            MeshfreeError::DuplicateParameter { parameter } => {
                write!(f, "Parameter '{}' was set more than once", parameter)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MeshfreeError {}
