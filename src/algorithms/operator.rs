//! Linear operators applied on top of local regression.
//!
//! ## Purpose
//!
//! Operator regression turns value-reconstruction weights into weights for a
//! linear functional of the field: a point value elsewhere, all Taylor
//! derivatives, the gradient, or an integral over a small domain. This module
//! defines the `Operator` contract and the reference `OperatorKind`.
//!
//! ## Design notes
//!
//! * An operator is described by its action on the global basis: column `j`
//!   of `apply_basis` holds output `j` applied to every basis function `b_m`.
//! * Integrals are computed about the domain centroid, where the first
//!   moments vanish, and re-centered with the basis transfer factor.
//! * Moments are exact up to degree 2, the highest basis order supported.
//!
//! ## Key concepts
//!
//! * **Domain**: the tag saying how to read an operator's point data.
//!   Pointwise operators take `Domain::Point` with one evaluation point.
//!   Integrals take a simplex (`Interval`, `Triangle`, `Tetrahedron`, given by
//!   its vertices) or an axis-aligned `Box` (given by two opposite corners).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

use crate::math::basis::{Basis, BasisType, MultiIndex};
use crate::primitives::errors::MeshfreeError;
use crate::primitives::matrix::Matrix;
use crate::primitives::point::{Point, MAX_DIMENSION};

// ============================================================================
// Domain
// ============================================================================

/// Shape tag for an operator's point data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Domain {
    /// A single evaluation point (default).
    #[default]
    Point,

    /// 1-D segment given by its two end points.
    Interval,

    /// 2-D triangle given by its three vertices.
    Triangle,

    /// 3-D tetrahedron given by its four vertices.
    Tetrahedron,

    /// Axis-aligned box given by two opposite corners, any dimension.
    Box,
}

impl Domain {
    /// Required number of points and, for simplices, the required dimension.
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Domain::Point => (1, None),
            Domain::Interval => (2, Some(1)),
            Domain::Triangle => (3, Some(2)),
            Domain::Tetrahedron => (4, Some(3)),
            Domain::Box => (2, None),
        }
    }

    fn is_simplex(&self) -> bool {
        matches!(self, Domain::Interval | Domain::Triangle | Domain::Tetrahedron)
    }
}

// ============================================================================
// Operator trait
// ============================================================================

/// A linear functional applied to the reconstructed field.
pub trait Operator<T, const D: usize> {
    /// The operator applied to each basis function: an `nbasis × output_size` matrix.
    fn apply_basis(
        &self,
        basis: BasisType,
        domain: Domain,
        data: &[Point<T, D>],
    ) -> Result<Matrix<T>, MeshfreeError>;

    /// Number of outputs the operator produces for `domain`.
    fn output_size(&self, basis: BasisType, domain: Domain) -> usize;

    /// Check that `data` is usable with `domain`. Called once per target at
    /// construction.
    fn check_data(&self, _domain: Domain, _data: &[Point<T, D>]) -> Result<(), MeshfreeError> {
        Ok(())
    }
}

/// Reference operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Field value at a point.
    PointValue,

    /// Every Taylor coefficient (value and derivatives) at a point.
    Derivatives,

    /// Gradient at a point.
    Gradient,

    /// Integral of the field over a domain.
    VolumeIntegral,
}

impl<T: Float, const D: usize> Operator<T, D> for OperatorKind {
    fn apply_basis(
        &self,
        basis: BasisType,
        domain: Domain,
        data: &[Point<T, D>],
    ) -> Result<Matrix<T>, MeshfreeError> {
        <Self as Operator<T, D>>::check_data(self, domain, data)?;
        let basis = Basis::new(basis, D)?;
        let n = basis.size();

        let op = match self {
            OperatorKind::PointValue => {
                let values = basis.function(data[0].as_slice());
                Matrix::from_fn(n, 1, |m, _| values[m])
            }
            OperatorKind::Derivatives => basis.jet(data[0].as_slice()),
            OperatorKind::Gradient => {
                let jet = basis.jet(data[0].as_slice());
                // Linear terms sit at indices 1..=D; a constant basis has none.
                Matrix::from_fn(n, D, |m, j| if 1 + j < n { jet[(m, 1 + j)] } else { T::zero() })
            }
            OperatorKind::VolumeIntegral => {
                let (centroid, volume, second) = centered_moments(domain, data);
                let moments: Vec<T> = basis
                    .exponents()
                    .iter()
                    .map(|alpha| centered_moment(alpha, volume, &second))
                    .collect();
                let column = basis.transfactor(centroid.as_slice()).mul_vec(&moments);
                Matrix::from_fn(n, 1, |m, _| column[m])
            }
        };
        Ok(op)
    }

    fn output_size(&self, basis: BasisType, _domain: Domain) -> usize {
        match self {
            OperatorKind::PointValue | OperatorKind::VolumeIntegral => 1,
            OperatorKind::Derivatives => basis.function_size(D),
            OperatorKind::Gradient => D,
        }
    }

    fn check_data(&self, domain: Domain, data: &[Point<T, D>]) -> Result<(), MeshfreeError> {
        let pointwise = !matches!(self, OperatorKind::VolumeIntegral);
        if pointwise && domain != Domain::Point {
            return Err(MeshfreeError::InvalidOperatorData(format!(
                "{:?} is evaluated at a point, got domain {:?}",
                self, domain
            )));
        }
        if !pointwise && domain == Domain::Point {
            return Err(MeshfreeError::InvalidOperatorData(format!(
                "{:?} needs an extended domain, got {:?}",
                self, domain
            )));
        }
        let (count, dim) = domain.arity();
        if data.len() != count {
            return Err(MeshfreeError::InvalidOperatorData(format!(
                "{:?} needs {} points, got {}",
                domain,
                count,
                data.len()
            )));
        }
        if let Some(dim) = dim {
            if dim != D {
                return Err(MeshfreeError::InvalidOperatorData(format!(
                    "{:?} is a {}-D domain, points are {}-D",
                    domain, dim, D
                )));
            }
        }
        if data.iter().any(|p| !p.is_finite()) {
            return Err(MeshfreeError::InvalidOperatorData(format!(
                "{:?} has non-finite coordinates",
                domain
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Domain moments
// ============================================================================

type SecondMoments<T> = [[T; MAX_DIMENSION]; MAX_DIMENSION];

/// Centroid, volume and centered second moments `∫ u_i u_j` of a domain.
fn centered_moments<T: Float, const D: usize>(
    domain: Domain,
    data: &[Point<T, D>],
) -> (Point<T, D>, T, SecondMoments<T>) {
    let zero = T::zero();
    let one = T::one();
    let mut second = [[zero; MAX_DIMENSION]; MAX_DIMENSION];

    if domain.is_simplex() {
        let count = T::from(data.len()).unwrap_or(one);
        let mut centroid = Point::origin();
        for p in data {
            centroid = centroid + *p;
        }
        for axis in 0..D {
            centroid[axis] = centroid[axis] / count;
        }

        let edges: Vec<Point<T, D>> = data[1..].iter().map(|p| *p - data[0]).collect();
        let volume = simplex_volume(&edges);

        // ∫ u_i u_j = V / ((d+1)(d+2)) Σ_k u_k^i u_k^j for centered vertices u_k.
        let d = T::from(D).unwrap_or(one);
        let scale = volume / ((d + one) * (d + one + one));
        for p in data {
            let u = *p - centroid;
            for i in 0..D {
                for j in 0..D {
                    second[i][j] = second[i][j] + scale * u[i] * u[j];
                }
            }
        }
        (centroid, volume, second)
    } else {
        let two = one + one;
        let three = two + one;
        let mut centroid = Point::origin();
        let mut volume = one;
        let mut half = [zero; MAX_DIMENSION];
        for axis in 0..D {
            centroid[axis] = (data[0][axis] + data[1][axis]) / two;
            half[axis] = (data[1][axis] - data[0][axis]).abs() / two;
            volume = volume * two * half[axis];
        }
        for axis in 0..D {
            second[axis][axis] = volume * half[axis] * half[axis] / three;
        }
        (centroid, volume, second)
    }
}

/// Volume of the simplex spanned by `edges` from a common vertex.
fn simplex_volume<T: Float, const D: usize>(edges: &[Point<T, D>]) -> T {
    let two = T::one() + T::one();
    match D {
        1 => edges[0][0].abs(),
        2 => (edges[0][0] * edges[1][1] - edges[0][1] * edges[1][0]).abs() / two,
        _ => {
            let (a, b, c) = (&edges[0], &edges[1], &edges[2]);
            let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
                + a[2] * (b[0] * c[1] - b[1] * c[0]);
            det.abs() / (two * (two + T::one()))
        }
    }
}

/// `∫ b_α(u)` about the centroid, for `|α| ≤ 2`.
fn centered_moment<T: Float>(alpha: &MultiIndex, volume: T, second: &SecondMoments<T>) -> T {
    let order: u8 = alpha.iter().sum();
    match order {
        0 => volume,
        1 => T::zero(),
        _ => {
            let mut axes = alpha
                .iter()
                .enumerate()
                .flat_map(|(axis, &p)| core::iter::repeat(axis).take(p as usize));
            let i = axes.next().unwrap_or(0);
            let j = axes.next().unwrap_or(i);
            if i == j {
                second[i][j] / (T::one() + T::one())
            } else {
                second[i][j]
            }
        }
    }
}
