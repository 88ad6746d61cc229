//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures shared by every other
//! layer: coordinates, small dense matrices, point clouds, error types, solver
//! hints, and reusable scratch space.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Linear solver backend hints.
pub mod backend;

/// Reusable per-stencil scratch space.
pub mod buffer;

/// Error types.
pub mod errors;

/// Row-major dense matrices.
pub mod matrix;

/// Fixed-dimension coordinates.
pub mod point;

/// Point clouds with an owned subset.
pub mod swarm;
