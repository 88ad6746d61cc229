//! Polynomial basis engine.
//!
//! ## Purpose
//!
//! This module evaluates the monomial basis used for local reconstruction,
//! together with its jet (how coefficients transform when the expansion point
//! is translated), the inverse jet, shifted basis vectors, and the transfer
//! factor used to re-center operator expansions.
//!
//! ## Design notes
//!
//! * **Programmatic tables**: The basis for a `(BasisType, dim)` pair is a
//!   degree-graded list of exponent multi-indices, generated once by
//!   enumerating non-decreasing axis sequences. Nothing is unrolled per
//!   dimension.
//! * **Taylor normalization**: Each term is `b_α(x) = Π x_i^{α_i} / α_i!`, so
//!   a coefficient vector is directly the vector of partial derivatives
//!   `∂^α f` at the expansion point.
//! * **Closed-form jets**: With that normalization the binomial expansion of
//!   `b_α(x + u)` gives `jet[i][j] = b_{α_i − α_j}(x)` whenever `α_j ≤ α_i`
//!   componentwise, and 0 otherwise.
//!
//! ## Key concepts
//!
//! * **Ordering**: Within a degree, terms follow `i ≤ j` lexicographic axis
//!   order: `1, x, y, z, x², xy, xz, y², yz, z²` in 3-D.
//! * **Translation inverse**: `inverse_jet(x) = jet(−x)`.
//! * **Shift**: `shift(x, y) = function(y − x) = inverse_jet(x) · function(y)`.
//!
//! ## Invariants
//!
//! * `function_size(Unitary, d) = 1`, `function_size(Linear, d) = d + 1`,
//!   `function_size(Quadratic, d) = (d + 1)(d + 2) / 2`.
//! * Only dimensions `1..=3` are accepted.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

use crate::primitives::errors::MeshfreeError;
use crate::primitives::matrix::Matrix;
use crate::primitives::point::{Point, MAX_DIMENSION};

/// Exponent multi-index of one monomial.
pub type MultiIndex = [u8; MAX_DIMENSION];

// ============================================================================
// Basis Type
// ============================================================================

/// Polynomial order of the reconstruction basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BasisType {
    /// Degree 0: the constant function.
    Unitary,

    /// Degree 1: constant plus one linear term per axis (default).
    #[default]
    Linear,

    /// Degree 2: adds all second-order terms, mixed ones included.
    Quadratic,
}

impl BasisType {
    /// Polynomial degree.
    #[inline]
    pub const fn degree(&self) -> usize {
        match self {
            BasisType::Unitary => 0,
            BasisType::Linear => 1,
            BasisType::Quadratic => 2,
        }
    }

    /// Number of monomials in `dim` variables up to this degree.
    #[inline]
    pub const fn function_size(&self, dim: usize) -> usize {
        match self {
            BasisType::Unitary => 1,
            BasisType::Linear => dim + 1,
            BasisType::Quadratic => (dim + 1) * (dim + 2) / 2,
        }
    }

    /// Shape of the jet matrix.
    #[inline]
    pub const fn jet_size(&self, dim: usize) -> (usize, usize) {
        let n = self.function_size(dim);
        (n, n)
    }
}

/// Number of basis functions for `basis` in `dim` dimensions.
#[inline]
pub const fn function_size(basis: BasisType, dim: usize) -> usize {
    basis.function_size(dim)
}

/// Shape of the jet matrix for `basis` in `dim` dimensions.
#[inline]
pub const fn jet_size(basis: BasisType, dim: usize) -> (usize, usize) {
    basis.jet_size(dim)
}

// ============================================================================
// Basis Strategy
// ============================================================================

/// A basis resolved for one `(BasisType, dim)` pair.
///
/// Holds the multi-index table so repeated evaluations (one per neighbor in
/// the accumulator) do not regenerate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    kind: BasisType,
    dim: usize,
    exponents: Vec<MultiIndex>,
}

impl Basis {
    /// Resolve the basis table for `kind` in `dim` dimensions.
    pub fn new(kind: BasisType, dim: usize) -> Result<Self, MeshfreeError> {
        if dim == 0 || dim > MAX_DIMENSION {
            return Err(MeshfreeError::UnsupportedDimension(dim));
        }
        let exponents = graded_exponents(kind.degree(), dim);
        debug_assert_eq!(exponents.len(), kind.function_size(dim));
        Ok(Self {
            kind,
            dim,
            exponents,
        })
    }

    /// Basis order.
    #[inline]
    pub fn kind(&self) -> BasisType {
        self.kind
    }

    /// Spatial dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of basis functions.
    #[inline]
    pub fn size(&self) -> usize {
        self.exponents.len()
    }

    /// Exponent multi-index of every term, in basis order.
    #[inline]
    pub fn exponents(&self) -> &[MultiIndex] {
        &self.exponents
    }

    /// Basis vector at `x`.
    pub fn function<T: Float>(&self, x: &[T]) -> Vec<T> {
        let mut out = vec![T::zero(); self.size()];
        self.function_into(x, &mut out);
        out
    }

    /// Basis vector at `x`, written into `out[..size()]`.
    pub fn function_into<T: Float>(&self, x: &[T], out: &mut [T]) {
        debug_assert_eq!(x.len(), self.dim);
        for (o, alpha) in out.iter_mut().zip(self.exponents.iter()) {
            *o = monomial(alpha, x);
        }
    }

    /// Jet at `x`: maps coefficients about the origin to coefficients about `x`.
    pub fn jet<T: Float>(&self, x: &[T]) -> Matrix<T> {
        debug_assert_eq!(x.len(), self.dim);
        let n = self.size();
        Matrix::from_fn(n, n, |i, j| {
            let (ai, aj) = (&self.exponents[i], &self.exponents[j]);
            match difference(ai, aj) {
                Some(delta) => monomial(&delta, x),
                None => T::zero(),
            }
        })
    }

    /// Inverse jet at `x`, computed as `jet(−x)`.
    pub fn inverse_jet<T: Float>(&self, x: &[T]) -> Matrix<T> {
        let mut neg = [T::zero(); MAX_DIMENSION];
        for (n, &c) in neg.iter_mut().zip(x.iter()) {
            *n = -c;
        }
        self.jet(&neg[..self.dim])
    }

    /// Basis of `y` expressed in the frame centered at `x`.
    pub fn shift<T: Float>(&self, x: &[T], y: &[T]) -> Vec<T> {
        let mut out = vec![T::zero(); self.size()];
        self.shift_into(x, y, &mut out);
        out
    }

    /// Shifted basis written into `out[..size()]`.
    pub fn shift_into<T: Float>(&self, x: &[T], y: &[T], out: &mut [T]) {
        debug_assert_eq!(x.len(), self.dim);
        debug_assert_eq!(y.len(), self.dim);
        let mut d = [T::zero(); MAX_DIMENSION];
        for (axis, di) in d.iter_mut().enumerate().take(self.dim) {
            *di = y[axis] - x[axis];
        }
        self.function_into(&d[..self.dim], out);
    }

    /// Transfer factor for re-centering an expansion by offset `c`.
    ///
    /// Row `m` holds the coefficients of `b_m(c + u)` in the basis `b_j(u)`, so
    /// a column of moments about `c` maps to moments about the origin.
    pub fn transfactor<T: Float>(&self, c: &[T]) -> Matrix<T> {
        self.jet(c)
    }
}

// ============================================================================
// Point-typed entry points
// ============================================================================

/// Basis vector of `kind` at `x`.
pub fn function<T: Float, const D: usize>(
    kind: BasisType,
    x: &Point<T, D>,
) -> Result<Vec<T>, MeshfreeError> {
    Ok(Basis::new(kind, D)?.function(x.as_slice()))
}

/// Jet of `kind` at `x`.
pub fn jet<T: Float, const D: usize>(
    kind: BasisType,
    x: &Point<T, D>,
) -> Result<Matrix<T>, MeshfreeError> {
    Ok(Basis::new(kind, D)?.jet(x.as_slice()))
}

/// Inverse jet of `kind` at `x`.
pub fn inverse_jet<T: Float, const D: usize>(
    kind: BasisType,
    x: &Point<T, D>,
) -> Result<Matrix<T>, MeshfreeError> {
    Ok(Basis::new(kind, D)?.inverse_jet(x.as_slice()))
}

/// Basis of `y` in the frame centered at `x`.
pub fn shift<T: Float, const D: usize>(
    kind: BasisType,
    x: &Point<T, D>,
    y: &Point<T, D>,
) -> Result<Vec<T>, MeshfreeError> {
    Ok(Basis::new(kind, D)?.shift(x.as_slice(), y.as_slice()))
}

/// Coefficient transfer matrix for an offset `c`.
pub fn transfactor<T: Float, const D: usize>(
    kind: BasisType,
    c: &Point<T, D>,
) -> Result<Matrix<T>, MeshfreeError> {
    Ok(Basis::new(kind, D)?.transfactor(c.as_slice()))
}

// ============================================================================
// Multi-index helpers
// ============================================================================

/// All multi-indices with `|α| ≤ degree` in `dim` variables, degree-graded.
fn graded_exponents(degree: usize, dim: usize) -> Vec<MultiIndex> {
    let mut out = Vec::with_capacity(BasisType::Quadratic.function_size(dim));
    for k in 0..=degree {
        // Non-decreasing axis sequences of length k enumerate the degree-k
        // monomials exactly once each.
        let mut axes = vec![0usize; k];
        loop {
            let mut alpha = [0u8; MAX_DIMENSION];
            for &a in &axes {
                alpha[a] += 1;
            }
            out.push(alpha);
            if !advance(&mut axes, dim) {
                break;
            }
        }
    }
    out
}

/// Step to the next non-decreasing sequence. Returns false when exhausted.
fn advance(axes: &mut [usize], dim: usize) -> bool {
    for pos in (0..axes.len()).rev() {
        if axes[pos] + 1 < dim {
            let next = axes[pos] + 1;
            for a in &mut axes[pos..] {
                *a = next;
            }
            return true;
        }
    }
    false
}

/// `a − b` if `b ≤ a` componentwise.
#[inline]
fn difference(a: &MultiIndex, b: &MultiIndex) -> Option<MultiIndex> {
    let mut out = [0u8; MAX_DIMENSION];
    for axis in 0..MAX_DIMENSION {
        out[axis] = a[axis].checked_sub(b[axis])?;
    }
    Some(out)
}

/// `Π x_i^{α_i} / α_i!`.
#[inline]
fn monomial<T: Float>(alpha: &MultiIndex, x: &[T]) -> T {
    let mut value = T::one();
    for (&p, &xi) in alpha.iter().zip(x.iter()) {
        if p > 0 {
            value = value * xi.powi(p as i32) / factorial(p);
        }
    }
    value
}

#[inline]
fn factorial<T: Float>(p: u8) -> T {
    let mut f = T::one();
    let mut k = T::one();
    for _ in 1..p {
        k = k + T::one();
        f = f * k;
    }
    f
}
