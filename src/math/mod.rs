//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical building blocks of the
//! accumulator:
//! - The polynomial basis engine (basis vectors, jets, shifts, transfer factors)
//! - Kernel and geometry weight evaluation
//! - The linear solve with conditioning diagnostics
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Polynomial basis engine.
pub mod basis;

/// Kernel (weight) functions and support geometries.
pub mod kernel;

/// Linear algebra backend.
pub mod linalg;
