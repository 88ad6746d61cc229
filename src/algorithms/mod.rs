//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the accumulation itself: kernel density weights,
//! moving-least-squares corrected weights, and operator-transformed weights,
//! together with the linear operators that can be applied to a reconstruction.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-target weight accumulation.
pub mod accumulate;

/// Linear operators on the reconstruction basis.
pub mod operator;
