//! # Meshfree Accumulate: corrected meshfree weights for Rust
//!
//! Generalized moving-least-squares (GMLS) weights for remapping fields
//! between particle swarms, with optional linear operators applied to the
//! local reconstruction.
//!
//! ## What does it compute?
//!
//! Given a *source* swarm carrying field values and a *target* swarm where
//! the field is wanted, every target particle `x` is paired with a list of
//! neighboring source particles `y_n`. The accumulator returns one weight
//! vector per neighbor so that the caller can form
//!
//! ```text
//! f(x) ≈ Σ_n w_n · f(y_n)
//! ```
//!
//! and, depending on the estimator, the same sum reproduces derivatives or
//! the image of the field under an operator (gradient, integral over a cell).
//!
//! **Estimators:**
//! - `KernelDensity`: raw kernel weights, one scalar per neighbor
//! - `LocalRegression`: weights that reproduce polynomials of the basis order
//!   and yield the Taylor coefficients `∂^α f(x)`
//! - `OperatorRegression`: local regression followed by a linear operator
//!
//! **How it works:**
//!
//! 1. Evaluate a kernel weight `w_n` for every neighbor (support centered on
//!    the target under `Gather`, on the source under `Scatter`)
//! 2. Build the moment matrix `M = Σ w_n · b_n ⊗ b_n` of the shifted
//!    polynomial basis `b_n = b(y_n − x)`
//! 3. Solve `M z_n = b_n` for all neighbors with one factorization
//! 4. Emit `w_n · z_n`, optionally transformed by the operator
//!
//! ## Quick Start
//!
//! ```rust
//! use meshfree_accumulate::prelude::*;
//!
//! let source = PointCloud::from_coords(&[
//!     [0.0, 0.0],
//!     [1.0, 0.0],
//!     [0.0, 1.0],
//!     [-1.0, 0.0],
//!     [0.0, -1.0],
//! ]);
//! let target = PointCloud::from_coords(&[[0.1, 0.2]]);
//!
//! let accumulator = Accumulate::<f64, 2>::new()
//!     .estimate(LocalRegression)
//!     .basis(Linear)
//!     .kernels(vec![Epanechnikov])
//!     .smoothing(vec![vec![vec![2.0]]])
//!     .build(&source, &target)?;
//!
//! let result = accumulator.accumulate(0, &[0, 1, 2, 3, 4])?;
//! assert_eq!(result.status, StencilStatus::Regular);
//!
//! // The value weights form a partition of unity.
//! let total: f64 = result.entries.iter().map(|e| e.weights[0]).sum();
//! assert!((total - 1.0).abs() < 1e-10);
//! # Result::<(), MeshfreeError>::Ok(())
//! ```
//!
//! ### Operators
//!
//! ```rust
//! use meshfree_accumulate::prelude::*;
//!
//! let source = PointCloud::from_coords(&[[0.0], [0.5], [1.0], [1.5]]);
//! let target = PointCloud::from_coords(&[[0.75]]);
//!
//! // Integral of the reconstructed field over [0.5, 1.0].
//! let accumulator = Accumulate::<f64, 1>::new()
//!     .estimate(OperatorRegression)
//!     .operator(VolumeIntegral)
//!     .operator_domains(vec![Interval])
//!     .operator_data(vec![vec![Point::new([0.5]), Point::new([1.0])]])
//!     .smoothing(vec![vec![vec![1.0]]])
//!     .build(&source, &target)?;
//!
//! let result = accumulator.accumulate(0, &[0, 1, 2, 3])?;
//! // f(y) = 2y + 1 integrates to 1.25 over [0.5, 1.0].
//! let integral: f64 = result
//!     .entries
//!     .iter()
//!     .map(|e| e.weights[0] * (2.0 * source.points()[e.neighbor][0] + 1.0))
//!     .sum();
//! assert!((integral - 1.25).abs() < 1e-10);
//! # Result::<(), MeshfreeError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Configuration problems (wrong array lengths, malformed smoothing tensors,
//! missing operator, out-of-range indices) are returned as `MeshfreeError`.
//! Numerical trouble is not an error: every `Accumulation` carries a
//! `StencilStatus`.
//!
//! - `Regular`: weights computed normally
//! - `Degenerate`: fewer neighbors than basis functions; every weight is zero
//! - `Unreliable { bad_solves }`: the moment matrix was singular or
//!   ill-conditioned; the least-squares weights are returned but should not
//!   be trusted
//!
//! ### Batches
//!
//! `accumulate_all` runs an accumulator over a list of `(target, neighbors)`
//! stencils and returns a `StencilReport` tallying the outcomes. With the
//! `parallel` feature the stencils are distributed with rayon.
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: a `debug` summary when an
//! accumulator is built, a `trace` line per stencil and a `warn` for every
//! unreliable target. No logger is installed by the library.
//!
//! ## Features
//!
//! - `std` (default): standard library support; disable for `no_std + alloc`
//! - `parallel`: rayon fan-out in `accumulate_all`
//! - `dev`: exposes the `internals` module for testing

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains coordinates, small dense matrices, point clouds, errors, solver
// hints and reusable scratch buffers.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the polynomial basis engine, kernels and support geometries, and
// the linear solve with conditioning diagnostics.
mod math;

// Layer 3: Algorithms - core accumulation algorithms.
//
// Contains the `Accumulator` (kernel density, local regression, operator
// regression) and the reference operators.
mod algorithms;

// Layer 4: Engine - validation and batch execution.
//
// Contains configuration validation and the sequential / parallel batch
// executor.
mod engine;

// High-level fluent API.
//
// Provides the `AccumulateBuilder` for configuring an `Accumulator`.
mod api;

// ============================================================================
// Public API
// ============================================================================

pub use crate::algorithms::accumulate::{AccumulateConfig, Accumulator};
pub use crate::api::*;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use meshfree_accumulate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algorithms::accumulate::Accumulator;
    pub use crate::api::{
        accumulate_all, AccumulateBuilder as Accumulate, Accumulation, Domain,
        BasisType::{Linear, Quadratic, Unitary},
        Domain::{Interval, Tetrahedron, Triangle},
        EstimateType::{KernelDensity, LocalRegression, OperatorRegression},
        Geometry::{Element, Faceted, Tensor},
        Kernel::{Epanechnikov, Gaussian, Polyramp, Square, Tricube, B4},
        MeshfreeError, Operator,
        OperatorKind::{Derivatives, Gradient, PointValue, VolumeIntegral},
        Point, PointCloud, SolverBackend, StencilReport, StencilStatus, Swarm,
        WeightCenter::{Gather, Scatter},
        WeightEntry,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
