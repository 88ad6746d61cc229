//! Accumulation Types
//!
//! ## Purpose
//!
//! This module defines the configuration enums and result types of the
//! accumulation engine: `EstimateType`, `WeightCenter`, `AccumulateConfig`,
//! `WeightEntry`, `StencilStatus` and `Accumulation`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::operator::{Domain, OperatorKind};
use crate::math::basis::BasisType;
use crate::math::kernel::{Geometry, Kernel, SmoothingTensor};
use crate::primitives::backend::SolverBackend;
use crate::primitives::point::Point;

// ============================================================================
// Estimate Type
// ============================================================================

/// Which estimator the accumulator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EstimateType {
    /// Raw kernel weights, no correction.
    KernelDensity,

    /// Moving-least-squares corrected weights (default).
    #[default]
    LocalRegression,

    /// Local regression followed by a linear operator transform.
    OperatorRegression,
}

// ============================================================================
// Weight Center
// ============================================================================

/// Which particles the smoothing parameters are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeightCenter {
    /// Indexed by target particle; support centered on the target (default).
    #[default]
    Gather,

    /// Indexed by source particle; support centered on the source.
    Scatter,
}

// ============================================================================
// Configuration
// ============================================================================

/// Immutable configuration of one remap pass.
///
/// `kernels`, `geometries` and `smoothing` have one entry per owned target
/// under `Gather` and one per source particle under `Scatter`. The operator
/// fields are only read under `OperatorRegression`, where they carry one
/// entry per owned target.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulateConfig<T, const D: usize, O = OperatorKind> {
    /// Estimator.
    pub estimate: EstimateType,
    /// Which side the smoothing parameters belong to.
    pub center: WeightCenter,
    /// Kernel shape per particle.
    pub kernels: Vec<Kernel>,
    /// Support geometry per particle.
    pub geometries: Vec<Geometry>,
    /// Smoothing tensor per particle.
    pub smoothing: Vec<SmoothingTensor<T>>,
    /// Reconstruction basis.
    pub basis: BasisType,
    /// Operator applied under `OperatorRegression`.
    pub operator: Option<O>,
    /// Operator domain tag per owned target.
    pub operator_domains: Vec<Domain>,
    /// Operator point data per owned target.
    pub operator_data: Vec<Vec<Point<T, D>>>,
    /// Linear solver hint.
    pub solver_backend: SolverBackend,
}

// ============================================================================
// Results
// ============================================================================

/// Weights one neighbor contributes to one target.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry<T> {
    /// Source particle index.
    pub neighbor: usize,
    /// Weight vector: length 1, `nbasis`, or the operator output size.
    pub weights: Vec<T>,
}

/// Reliability of one target's weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StencilStatus {
    /// Weights computed normally (default).
    #[default]
    Regular,

    /// Fewer neighbors than basis functions; every weight is zero.
    Degenerate,

    /// The moment matrix was singular or ill-conditioned.
    Unreliable {
        /// Number of neighbor solves affected.
        bad_solves: usize,
    },
}

/// All weights for one target particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation<T> {
    /// Target particle index.
    pub target: usize,
    /// One entry per neighbor, in neighbor-list order.
    pub entries: Vec<WeightEntry<T>>,
    /// Reliability of the entries.
    pub status: StencilStatus,
}

impl<T> Accumulation<T> {
    /// Number of neighbor entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no neighbor entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into `(neighbor, weights)` pairs.
    pub fn into_pairs(self) -> Vec<(usize, Vec<T>)> {
        self.entries
            .into_iter()
            .map(|e| (e.neighbor, e.weights))
            .collect()
    }
}
