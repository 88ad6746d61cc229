#![cfg(feature = "dev")]
//! Tests for the polynomial basis engine.
//!
//! ## Test Organization
//!
//! 1. **Sizes** - term counts, ordering and jet shapes
//! 2. **Unitary** - the constant basis
//! 3. **Jets** - jet / inverse jet round trips
//! 4. **Shifts** - shift consistency with jets

use approx::assert_relative_eq;

use meshfree_accumulate::internals::math::basis::{self, Basis, BasisType, MultiIndex};
use meshfree_accumulate::internals::primitives::errors::MeshfreeError;
use meshfree_accumulate::internals::primitives::matrix::Matrix;
use meshfree_accumulate::internals::primitives::point::Point;

// ============================================================================
// Helper Functions
// ============================================================================

const KINDS: [BasisType; 3] = [BasisType::Unitary, BasisType::Linear, BasisType::Quadratic];

fn sample_point(dim: usize) -> Vec<f64> {
    [0.7, -1.3, 0.4][..dim].to_vec()
}

fn assert_identity(m: &Matrix<f64>, tol: f64) {
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(m[(i, j)], expected, epsilon = tol);
        }
    }
}

// ============================================================================
// Sizes
// ============================================================================

#[test]
fn test_function_sizes() {
    for dim in 1..=3 {
        assert_eq!(basis::function_size(BasisType::Unitary, dim), 1);
        assert_eq!(basis::function_size(BasisType::Linear, dim), dim + 1);
        assert_eq!(
            basis::function_size(BasisType::Quadratic, dim),
            (dim + 1) * (dim + 2) / 2
        );
        for kind in KINDS {
            let n = kind.function_size(dim);
            assert_eq!(basis::jet_size(kind, dim), (n, n));
            assert_eq!(Basis::new(kind, dim).unwrap().size(), n);
        }
    }
}

#[test]
fn test_quadratic_3d_ordering_is_degree_graded() {
    let b = Basis::new(BasisType::Quadratic, 3).unwrap();
    let expected: [MultiIndex; 10] = [
        [0, 0, 0],
        [1, 0, 0],
        [0, 1, 0],
        [0, 0, 1],
        [2, 0, 0],
        [1, 1, 0],
        [1, 0, 1],
        [0, 2, 0],
        [0, 1, 1],
        [0, 0, 2],
    ];
    assert_eq!(b.exponents(), &expected);
}

#[test]
fn test_quadratic_2d_function_values() {
    let b = Basis::new(BasisType::Quadratic, 2).unwrap();
    let v = b.function(&[2.0, 3.0]);
    // 1, x, y, x²/2, xy, y²/2
    let expected = [1.0, 2.0, 3.0, 2.0, 6.0, 4.5];
    for (a, e) in v.iter().zip(expected.iter()) {
        assert_relative_eq!(a, e);
    }
}

#[test]
fn test_rejects_unsupported_dimension() {
    assert_eq!(
        Basis::new(BasisType::Linear, 4).unwrap_err(),
        MeshfreeError::UnsupportedDimension(4)
    );
    assert!(Basis::new(BasisType::Unitary, 0).is_err());
}

// ============================================================================
// Unitary
// ============================================================================

#[test]
fn test_unitary_is_identity_everywhere() {
    for dim in 1..=3 {
        let b = Basis::new(BasisType::Unitary, dim).unwrap();
        let x = sample_point(dim);
        assert_eq!(b.function(&x), vec![1.0]);
        let (jet, ijet) = (b.jet(&x), b.inverse_jet(&x));
        assert_eq!((jet.rows(), jet.cols()), (1, 1));
        assert_eq!(jet[(0, 0)], 1.0);
        assert_eq!(ijet[(0, 0)], 1.0);
        assert_eq!(b.shift(&x, &[5.0, 5.0, 5.0][..dim]), vec![1.0]);
    }
}

// ============================================================================
// Jets
// ============================================================================

#[test]
fn test_jet_inverse_round_trip() {
    for dim in 1..=3 {
        for kind in KINDS {
            let b = Basis::new(kind, dim).unwrap();
            let x = sample_point(dim);
            let jet = b.jet(&x);
            let ijet = b.inverse_jet(&x);
            assert_identity(&ijet.matmul(&jet), 1e-12);
            assert_identity(&jet.matmul(&ijet), 1e-12);
        }
    }
}

#[test]
fn test_jet_is_lower_triangular_with_unit_diagonal() {
    let b = Basis::new(BasisType::Quadratic, 3).unwrap();
    let jet = b.jet(&[1.5, -2.0, 0.25]);
    for i in 0..b.size() {
        assert_eq!(jet[(i, i)], 1.0);
        for j in (i + 1)..b.size() {
            assert_eq!(jet[(i, j)], 0.0);
        }
    }
}

#[test]
fn test_jet_entries_are_taylor_derivatives() {
    let b = Basis::new(BasisType::Quadratic, 2).unwrap();
    let j = b.jet(&[0.5, -2.0]);
    // Column 0 is the basis itself.
    assert_relative_eq!(j[(3, 0)], 0.125);
    assert_relative_eq!(j[(4, 0)], -1.0);
    // xy differentiated in x is y, in y is x.
    assert_relative_eq!(j[(4, 1)], -2.0);
    assert_relative_eq!(j[(4, 2)], 0.5);
}

#[test]
fn test_jet_maps_coefficients() {
    // f = 1 + 2x + 3y + 4·x²/2 + 5·xy + 6·y²/2 has derivative vector c at 0.
    let b = Basis::new(BasisType::Quadratic, 2).unwrap();
    let c = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let x = [0.5, -1.0];
    let f = |p: &[f64]| b.function(p).iter().zip(c.iter()).map(|(v, k)| v * k).sum::<f64>();

    // Derivatives about x are cᵀ · jet(x).
    let cx = b.jet(&x).vec_mul(&c);
    assert_relative_eq!(cx[0], f(&x), epsilon = 1e-12);
    // ∂f/∂x = 2 + 4x + 5y
    assert_relative_eq!(cx[1], 2.0 + 4.0 * 0.5 - 5.0, epsilon = 1e-12);
    // ∂f/∂y = 3 + 5x + 6y
    assert_relative_eq!(cx[2], 3.0 + 2.5 - 6.0, epsilon = 1e-12);
    assert_relative_eq!(cx[3], 4.0, epsilon = 1e-12);
    assert_relative_eq!(cx[4], 5.0, epsilon = 1e-12);
    assert_relative_eq!(cx[5], 6.0, epsilon = 1e-12);
}

#[test]
fn test_transfactor_equals_jet() {
    let c = Point::new([0.3, 0.9, -0.2]);
    for kind in KINDS {
        let t = basis::transfactor(kind, &c).unwrap();
        let j = basis::jet(kind, &c).unwrap();
        assert_eq!(t, j);
    }
}

// ============================================================================
// Shifts
// ============================================================================

#[test]
fn test_shift_consistency() {
    for dim in 1..=3 {
        for kind in KINDS {
            let b = Basis::new(kind, dim).unwrap();
            let x = sample_point(dim);
            let y: Vec<f64> = x.iter().map(|v| v * 0.5 + 0.2).collect();
            let shifted = b.shift(&x, &y);
            let via_jet = b.inverse_jet(&x).mul_vec(&b.function(&y));
            for (s, v) in shifted.iter().zip(via_jet.iter()) {
                assert_relative_eq!(*s, *v, epsilon = 1e-12);
            }
            let diff: Vec<f64> = y.iter().zip(x.iter()).map(|(a, b)| a - b).collect();
            assert_eq!(shifted, b.function(&diff));
        }
    }
}

#[test]
fn test_shift_at_self_is_unit_vector() {
    let x = Point::new([1.0, 2.0]);
    let v = basis::shift(BasisType::Quadratic, &x, &x).unwrap();
    assert_eq!(v, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_point_entry_points_agree() {
    let x = Point::new([0.5_f32, 0.25]);
    let b = Basis::new(BasisType::Linear, 2).unwrap();
    assert_eq!(
        basis::function(BasisType::Linear, &x).unwrap(),
        b.function(x.as_slice())
    );
    assert_eq!(
        basis::inverse_jet(BasisType::Linear, &x).unwrap(),
        b.inverse_jet(x.as_slice())
    );
}
