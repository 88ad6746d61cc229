//! Scratch space for per-target accumulation.
//!
//! ## Purpose
//!
//! Every target stencil needs a moment matrix, one shifted basis vector per
//! neighbor and one scalar kernel weight per neighbor. `StencilBuffer` holds
//! those so a worker can reuse the allocations across the targets it handles.
//!
//! ## Design notes
//!
//! * **Lazy Expansion**: Slots grow on demand and are never shrunk.
//! * **Explicit ownership**: Buffers are passed in by the caller, one per
//!   worker, so parallel fan-out needs no locking.
//!
//! ## Invariants
//!
//! * After `reset(nbasis, nneighbors)` the moment slot holds `nbasis²` zeros and
//!   the basis slot holds `nbasis * nneighbors` zeros.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::ops::{Deref, DerefMut};
use num_traits::Float;

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }
}

impl<T: Clone> Slot<T> {
    /// Clear and refill with `len` copies of `value`.
    #[inline]
    pub fn fill(&mut self, len: usize, value: T) {
        self.0.clear();
        self.0.resize(len, value);
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Stencil Buffer
// ============================================================================

/// Per-target scratch space for the moment-matrix assembly.
#[derive(Debug, Clone, Default)]
pub struct StencilBuffer<T> {
    /// Scalar kernel weight of each neighbor.
    pub weights: Slot<T>,
    /// Shifted basis vectors, one contiguous block of `nbasis` per neighbor.
    pub basis: Slot<T>,
    /// Moment matrix, `nbasis × nbasis`.
    pub moment: Slot<T>,
}

impl<T: Float> StencilBuffer<T> {
    /// Create a buffer sized for `k` neighbors and `nbasis` basis functions.
    pub fn new(k: usize, nbasis: usize) -> Self {
        Self {
            weights: Slot::new(k),
            basis: Slot::new(k * nbasis),
            moment: Slot::new(nbasis * nbasis),
        }
    }

    /// Zero the buffer for a stencil of `nneighbors` and `nbasis`.
    pub fn reset(&mut self, nbasis: usize, nneighbors: usize) {
        self.weights.fill(nneighbors, T::zero());
        self.basis.fill(nbasis * nneighbors, T::zero());
        self.moment.fill(nbasis * nbasis, T::zero());
    }
}
