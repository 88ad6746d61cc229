//! Point clouds ("swarms").
//!
//! ## Purpose
//!
//! The accumulator never searches or mutates point sets; it only asks for
//! counts and coordinates. `Swarm` is that read-only contract, and
//! `PointCloud` is a plain vector-backed implementation of it.
//!
//! ## Key concepts
//!
//! * **Owned particles**: the leading `owned_particle_count()` particles are
//!   the ones this process computes results for. Ghost particles follow.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

use crate::primitives::errors::MeshfreeError;
use crate::primitives::point::Point;

/// Read-only access to a collection of particle positions.
pub trait Swarm<T, const D: usize> {
    /// Total number of particles, owned and ghost.
    fn particle_count(&self) -> usize;

    /// Number of owned particles. Owned particles occupy indices `0..owned`.
    fn owned_particle_count(&self) -> usize;

    /// Coordinates of particle `index`.
    ///
    /// Callers guarantee `index < particle_count()`.
    fn coordinates(&self, index: usize) -> Point<T, D>;
}

/// Vector-backed swarm.
#[derive(Debug, Clone)]
pub struct PointCloud<T, const D: usize> {
    points: Vec<Point<T, D>>,
    owned: usize,
}

impl<T: Float, const D: usize> PointCloud<T, D> {
    /// A swarm in which every particle is owned.
    pub fn new(points: Vec<Point<T, D>>) -> Self {
        let owned = points.len();
        Self { points, owned }
    }

    /// A swarm whose first `owned` particles are owned and the rest are ghosts.
    pub fn with_owned(points: Vec<Point<T, D>>, owned: usize) -> Result<Self, MeshfreeError> {
        if owned > points.len() {
            return Err(MeshfreeError::InvalidOwnedCount {
                owned,
                total: points.len(),
            });
        }
        Ok(Self { points, owned })
    }

    /// Build from raw coordinate arrays.
    pub fn from_coords(coords: &[[T; D]]) -> Self {
        Self::new(coords.iter().copied().map(Point::new).collect())
    }

    /// All particle positions.
    pub fn points(&self) -> &[Point<T, D>] {
        &self.points
    }
}

impl<T: Float, const D: usize> Swarm<T, D> for PointCloud<T, D> {
    #[inline]
    fn particle_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn owned_particle_count(&self) -> usize {
        self.owned
    }

    #[inline]
    fn coordinates(&self, index: usize) -> Point<T, D> {
        self.points[index]
    }
}
