//! Fixed-dimension coordinates.
//!
//! `Point<T, D>` is a plain value type: a coordinate tuple with no identity.
//! The dimension is a const generic; only `D ∈ {1, 2, 3}` is accepted by the
//! basis engine and the accumulator.

use core::ops::{Add, Index, IndexMut, Sub};
use num_traits::Float;

/// Largest spatial dimension handled by the basis engine.
pub const MAX_DIMENSION: usize = 3;

/// A point (or displacement) in `D`-dimensional space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T, const D: usize>(pub [T; D]);

impl<T: Float, const D: usize> Point<T, D> {
    /// Create a point from its coordinates.
    #[inline]
    pub const fn new(coords: [T; D]) -> Self {
        Self(coords)
    }

    /// The origin.
    #[inline]
    pub fn origin() -> Self {
        Self([T::zero(); D])
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Whether every coordinate is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl<T: Float, const D: usize> Default for Point<T, D> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<T: Float, const D: usize> From<[T; D]> for Point<T, D> {
    fn from(coords: [T; D]) -> Self {
        Self(coords)
    }
}

impl<T: Float, const D: usize> Sub for Point<T, D> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, &r) in out.iter_mut().zip(rhs.0.iter()) {
            *o = *o - r;
        }
        Self(out)
    }
}

impl<T: Float, const D: usize> Add for Point<T, D> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, &r) in out.iter_mut().zip(rhs.0.iter()) {
            *o = *o + r;
        }
        Self(out)
    }
}

impl<T, const D: usize> Index<usize> for Point<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, axis: usize) -> &T {
        &self.0[axis]
    }
}

impl<T, const D: usize> IndexMut<usize> for Point<T, D> {
    #[inline]
    fn index_mut(&mut self, axis: usize) -> &mut T {
        &mut self.0[axis]
    }
}
