//! Smoothing kernels and support geometries.
//!
//! ## Purpose
//!
//! This module evaluates the scalar weight a source particle receives in a
//! target's stencil. A weight is the product of a kernel shape (`Kernel`), a
//! support topology (`Geometry`) and a per-particle smoothing tensor.
//!
//! ## Design notes
//!
//! * **Unnormalized shapes**: Kernels are not normalized to unit mass. The
//!   regression estimators are invariant to a global scale of the weights;
//!   only kernel density estimates see the raw value.
//! * **Argument order**: `evaluate(.., a, b, ..)` centers the support on `a`.
//!   `Element` and `Tensor` supports are symmetric under swapping `a` and `b`;
//!   `Faceted` supports are not.
//!
//! ## Key concepts
//!
//! * **Element**: radial support, `r² = Σ ((b_i − a_i) / h_i)²` with one
//!   smoothing row of length 1 (isotropic) or `D` (axis-scaled).
//! * **Tensor**: product of one-dimensional kernels along each axis.
//! * **Faceted**: support bounded by planar facets. Each smoothing row is
//!   `[n_1, .., n_D, d]`: a facet normal and its distance from the center.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

use crate::primitives::point::Point;

/// Per-particle smoothing tensor: one or more rows of smoothing data.
pub type SmoothingTensor<T> = Vec<Vec<T>>;

// ============================================================================
// Kernel
// ============================================================================

/// One-dimensional kernel shape, evaluated at a normalized distance `u ≥ 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kernel {
    /// Cubic B-spline, support `u < 2` (default).
    #[default]
    B4,

    /// Top hat, support `u ≤ 1`.
    Square,

    /// `1 − u²`, support `u < 1`.
    Epanechnikov,

    /// `(1 − u)²(1 + 2u)`, a C¹ ramp with support `u < 1`.
    Polyramp,

    /// `exp(−u²)` truncated at `u ≥ 3`.
    Gaussian,

    /// `(1 − u³)³`, support `u < 1`.
    Tricube,
}

impl Kernel {
    /// Normalized distance beyond which the kernel vanishes.
    #[inline]
    pub fn support<T: Float>(&self) -> T {
        let (one, two) = (T::one(), T::one() + T::one());
        match self {
            Kernel::B4 => two,
            Kernel::Gaussian => two + one,
            _ => one,
        }
    }

    /// Kernel value at normalized distance `u`.
    pub fn evaluate<T: Float>(&self, u: T) -> T {
        let u = u.abs();
        let zero = T::zero();
        let one = T::one();
        let two = one + one;
        if u >= self.support() && *self != Kernel::Square {
            return zero;
        }
        match self {
            Kernel::B4 => {
                let quarter = one / (two * two);
                if u < one {
                    one - (two - one / two) * u * u + (two + one) * quarter * u * u * u
                } else {
                    let v = two - u;
                    quarter * v * v * v
                }
            }
            Kernel::Square => {
                if u <= one {
                    one
                } else {
                    zero
                }
            }
            Kernel::Epanechnikov => one - u * u,
            Kernel::Polyramp => {
                let v = one - u;
                v * v * (one + two * u)
            }
            Kernel::Gaussian => (-u * u).exp(),
            Kernel::Tricube => {
                let v = one - u * u * u;
                v * v * v
            }
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Support topology of the weight function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Geometry {
    /// Radial support (default).
    #[default]
    Element,

    /// Axis-aligned product support.
    Tensor,

    /// Support bounded by planar facets around the center.
    Faceted,
}

// ============================================================================
// Weight evaluation
// ============================================================================

/// Evaluates the scalar weight of `b` in the support centered at `a`.
pub trait WeightEvaluator<T, const D: usize> {
    /// Weight of `b` relative to the center `a`. Argument order matters.
    fn evaluate(
        &self,
        geometry: Geometry,
        kernel: Kernel,
        a: &Point<T, D>,
        b: &Point<T, D>,
        smoothing: &[Vec<T>],
    ) -> T;
}

/// Reference weight evaluator combining `Kernel` and `Geometry`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KernelWeight;

impl<T: Float, const D: usize> WeightEvaluator<T, D> for KernelWeight {
    fn evaluate(
        &self,
        geometry: Geometry,
        kernel: Kernel,
        a: &Point<T, D>,
        b: &Point<T, D>,
        smoothing: &[Vec<T>],
    ) -> T {
        let zero = T::zero();
        let Some(first) = smoothing.first() else {
            return zero;
        };
        match geometry {
            Geometry::Element => {
                let mut r2 = zero;
                for axis in 0..D {
                    let h = axis_scale(first, axis);
                    let s = (b[axis] - a[axis]) / h;
                    r2 = r2 + s * s;
                }
                kernel.evaluate(r2.sqrt())
            }
            Geometry::Tensor => {
                let mut w = T::one();
                for axis in 0..D {
                    let h = axis_scale(first, axis);
                    w = w * kernel.evaluate((b[axis] - a[axis]) / h);
                    if w == zero {
                        break;
                    }
                }
                w
            }
            Geometry::Faceted => {
                let offset = *b - *a;
                let mut w = T::one();
                for facet in smoothing {
                    let distance = facet[D];
                    let normal_offset = facet[..D]
                        .iter()
                        .zip(offset.as_slice().iter())
                        .fold(zero, |acc, (&n, &o)| acc + n * o);
                    // Points behind a facet's center plane are not limited by it.
                    let u = (normal_offset / distance).max(zero);
                    w = w * kernel.evaluate(u);
                    if w == zero {
                        break;
                    }
                }
                w
            }
        }
    }
}

/// Smoothing length along `axis`: a single entry applies to every axis.
#[inline]
fn axis_scale<T: Float>(row: &[T], axis: usize) -> T {
    if row.len() == 1 {
        row[0]
    } else {
        row[axis]
    }
}
