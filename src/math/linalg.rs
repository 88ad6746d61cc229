//! Linear algebra backend for the moment-matrix solve.
//!
//! ## Purpose
//!
//! This module solves `M · Z = B` for the symmetric moment matrix `M` of one
//! target stencil and the matrix `B` whose columns are the neighbors' shifted
//! basis vectors, and reports how trustworthy the solve was.
//!
//! ## Design notes
//!
//! * Delegates to nalgebra. `FloatLinalg` bridges generic `Float` types (f32
//!   and f64) to the backend.
//! * The reciprocal condition number is taken from the singular values, which
//!   for at most 10×10 systems costs less than the neighbor loop.
//! * Rank-deficient systems are solved in the least-squares sense by SVD so
//!   the caller never receives NaNs; the status says the answer is unreliable.
//! * Thresholds are absolute in `rcond`, so `a` must already be free of unit
//!   scaling. The accumulator passes moments of length-normalized offsets.
//!
//! ## Invariants
//!
//! * `a` is `n × n` row-major; `b` and the solution are `n × k` column-major,
//!   i.e. one contiguous column per right-hand side.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::primitives::backend::SolverBackend;

// ============================================================================
// Solve Outcome
// ============================================================================

/// Diagnostic classification of a linear solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveStatus {
    /// Well-conditioned system solved by the requested backend.
    #[default]
    Ok,

    /// Solved, but the reciprocal condition number is below the warning threshold.
    IllConditioned,

    /// Numerically rank deficient; the least-squares solution is returned.
    Singular,
}

impl SolveStatus {
    /// Whether the solution can be trusted.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, SolveStatus::Ok)
    }
}

/// Solution of a multi-column solve plus its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome<T> {
    /// `n × k` column-major solution.
    pub solution: Vec<T>,
    /// Reliability classification.
    pub status: SolveStatus,
    /// Reciprocal 2-norm condition number, `σ_min / σ_max`.
    pub rcond: T,
}

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + Debug + Send + Sync + 'static {
    /// Reciprocal condition number at or below which a system is singular.
    const SINGULAR_RCOND: Self;

    /// Reciprocal condition number below which a system is ill-conditioned.
    const ILL_CONDITIONED_RCOND: Self;

    /// Solve `a · z = b` for `k` right-hand sides.
    fn solve_columns(
        a: &[Self],
        b: &[Self],
        n: usize,
        k: usize,
        backend: SolverBackend,
    ) -> SolveOutcome<Self>;
}

impl FloatLinalg for f64 {
    const SINGULAR_RCOND: f64 = f64::EPSILON * 100.0;
    const ILL_CONDITIONED_RCOND: f64 = 1e-12;

    #[inline]
    fn solve_columns(
        a: &[Self],
        b: &[Self],
        n: usize,
        k: usize,
        backend: SolverBackend,
    ) -> SolveOutcome<Self> {
        nalgebra_backend::solve_columns(
            a,
            b,
            n,
            k,
            backend,
            Self::SINGULAR_RCOND,
            Self::ILL_CONDITIONED_RCOND,
        )
    }
}

impl FloatLinalg for f32 {
    const SINGULAR_RCOND: f32 = f32::EPSILON * 100.0;
    const ILL_CONDITIONED_RCOND: f32 = 1e-4;

    #[inline]
    fn solve_columns(
        a: &[Self],
        b: &[Self],
        n: usize,
        k: usize,
        backend: SolverBackend,
    ) -> SolveOutcome<Self> {
        nalgebra_backend::solve_columns(
            a,
            b,
            n,
            k,
            backend,
            Self::SINGULAR_RCOND,
            Self::ILL_CONDITIONED_RCOND,
        )
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::{DMatrix, RealField};

    /// Solve `a · z = b` with the requested backend and classify the result.
    pub fn solve_columns<R: RealField + Copy>(
        a: &[R],
        b: &[R],
        n: usize,
        k: usize,
        backend: SolverBackend,
        singular_rcond: R,
        ill_rcond: R,
    ) -> SolveOutcome<R> {
        let matrix = DMatrix::from_row_slice(n, n, a);
        let rhs = DMatrix::from_column_slice(n, k, b);

        let svd = matrix.clone().svd(true, true);
        let (s_min, s_max) = svd
            .singular_values
            .iter()
            .fold((None::<R>, R::zero()), |(lo, hi), &s| {
                let lo = match lo {
                    Some(l) if l <= s => l,
                    _ => s,
                };
                (Some(lo), if s > hi { s } else { hi })
            });
        let s_min = s_min.unwrap_or_else(R::zero);
        let rcond = if s_max > R::zero() {
            s_min / s_max
        } else {
            R::zero()
        };

        let least_squares = |svd: &nalgebra::SVD<R, nalgebra::Dyn, nalgebra::Dyn>| {
            svd.solve(&rhs, singular_rcond * s_max)
                .map(|z| z.as_slice().to_vec())
                .unwrap_or_else(|_| vec![R::zero(); n * k])
        };

        if rcond <= singular_rcond {
            return SolveOutcome {
                solution: least_squares(&svd),
                status: SolveStatus::Singular,
                rcond,
            };
        }

        let direct = match backend {
            SolverBackend::Inverse => matrix.clone().try_inverse().map(|inv| inv * &rhs),
            SolverBackend::Qr => matrix.clone().qr().solve(&rhs),
            SolverBackend::Cholesky => match matrix.clone().cholesky() {
                Some(chol) => Some(chol.solve(&rhs)),
                None => matrix.clone().qr().solve(&rhs),
            },
        };

        match direct {
            Some(z) => SolveOutcome {
                solution: z.as_slice().to_vec(),
                status: if rcond < ill_rcond {
                    SolveStatus::IllConditioned
                } else {
                    SolveStatus::Ok
                },
                rcond,
            },
            None => SolveOutcome {
                solution: least_squares(&svd),
                status: SolveStatus::Singular,
                rcond,
            },
        }
    }
}
