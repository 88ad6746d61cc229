#![cfg(feature = "dev")]
//! Tests for points, point clouds and scratch buffers.
//!
//! ## Test Organization
//!
//! 1. **Points** - componentwise arithmetic
//! 2. **Swarms** - owned and ghost particles
//! 3. **Scratch** - matrices and stencil buffers

use meshfree_accumulate::internals::primitives::buffer::StencilBuffer;
use meshfree_accumulate::internals::primitives::matrix::Matrix;
use meshfree_accumulate::prelude::*;

// ============================================================================
// Points
// ============================================================================

#[test]
fn test_point_arithmetic_is_componentwise() {
    let a = Point::new([1.0, 2.0, 3.0]);
    let b = Point::new([0.5, -1.0, 2.0]);
    assert_eq!((a - b).0, [0.5, 3.0, 1.0]);
    assert_eq!((a + b).0, [1.5, 1.0, 5.0]);
    assert!(a.is_finite());
    assert!(!Point::new([0.0, f64::NAN]).is_finite());
}

// ============================================================================
// Swarms
// ============================================================================

#[test]
fn test_owned_count_bounded_by_total() {
    let pts = vec![Point::new([0.0]), Point::new([1.0])];
    let cloud = PointCloud::with_owned(pts.clone(), 1).unwrap();
    assert_eq!(cloud.owned_particle_count(), 1);
    assert_eq!(cloud.particle_count(), 2);
    assert_eq!(cloud.coordinates(1), Point::new([1.0]));

    let err = PointCloud::with_owned(pts, 3).unwrap_err();
    assert_eq!(err, MeshfreeError::InvalidOwnedCount { owned: 3, total: 2 });
}

#[test]
fn test_from_coords_owns_every_particle() {
    let cloud = PointCloud::from_coords(&[[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]]);
    assert_eq!(cloud.particle_count(), 3);
    assert_eq!(cloud.owned_particle_count(), 3);
    assert_eq!(cloud.points()[2], Point::new([4.0, 5.0]));
}

// ============================================================================
// Scratch
// ============================================================================

#[test]
fn test_matrix_products() {
    let a = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    let eye = |n| Matrix::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 });
    assert_eq!(eye(2).matmul(&a), a);
    assert_eq!(a.matmul(&eye(3)), a);

    // [[0, 1, 2], [3, 4, 5]]
    assert_eq!(a.mul_vec(&[1.0, 1.0, 1.0]), vec![3.0, 12.0]);
    assert_eq!(a.vec_mul(&[1.0, 1.0]), vec![3.0, 5.0, 7.0]);
    assert_eq!(a.row(1), &[3.0, 4.0, 5.0]);
    assert_eq!(Matrix::<f64>::zeros(2, 2), Matrix::from_fn(2, 2, |_, _| 0.0));
}

#[test]
fn test_reset_sizes_every_slot() {
    let mut buf = StencilBuffer::<f64>::new(2, 3);
    buf.moment.push(7.0);
    buf.reset(3, 5);
    assert_eq!(buf.weights.len(), 5);
    assert_eq!(buf.basis.len(), 15);
    assert_eq!(buf.moment.len(), 9);
    assert!(buf.moment.iter().all(|&m| m == 0.0));
}
