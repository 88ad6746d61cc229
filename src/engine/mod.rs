//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer validates configurations before an accumulator is built and
//! drives accumulators over batches of target stencils.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch execution over target stencils.
pub mod executor;

/// Configuration validation.
pub mod validator;
