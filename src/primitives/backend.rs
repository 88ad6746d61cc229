//! Linear solver backend selection.
//!
//! ## Purpose
//!
//! The moment-matrix solve can be performed by explicit inversion or by a
//! factorization. The accumulator is indifferent to the choice; this enum is
//! the hint it forwards to `math::linalg`.
//!
//! ## Design notes
//!
//! * Every backend falls back to an SVD least-squares solve when its own
//!   method fails, and reports that through `SolveStatus`.

/// Linear solver backend hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Explicit inverse, then multiply.
    Inverse,

    /// Householder QR factorization (default).
    #[default]
    Qr,

    /// Cholesky factorization of the symmetric moment matrix. Falls back to QR
    /// when the matrix is not numerically positive definite.
    Cholesky,
}
