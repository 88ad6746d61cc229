//! High-level API for meshfree weight accumulation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the accumulation configuration that ends in an
//! `Accumulator` bound to a source and a target swarm.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters
//!   except the smoothing tensors.
//! * **Validated**: The configuration is validated against the swarms when
//!   `.build()` is called; setting a parameter twice is an error.
//! * **Type-Safe**: Generic over `Float` types, the spatial dimension and the
//!   operator type.
//!
//! ## Key concepts
//!
//! * **Broadcast defaults**: Unset kernels and geometries default to
//!   `Kernel::B4` and `Geometry::Element` for every particle on the indexing
//!   side; unset operator domains default to `Domain::Point`.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`AccumulateBuilder`] via `Accumulate::new()`.
//! 2. Chain configuration methods (`.estimate()`, `.smoothing()`, etc.).
//! 3. Call `.build(&source, &target)` to get an `Accumulator`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::accumulate::estimator::Accumulator;
use crate::algorithms::accumulate::types::AccumulateConfig;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::accumulate::types::{
    Accumulation, EstimateType, StencilStatus, WeightCenter, WeightEntry,
};
pub use crate::algorithms::operator::{Domain, Operator, OperatorKind};
pub use crate::engine::executor::{accumulate_all, BatchOutput, StencilReport};
pub use crate::math::basis::BasisType;
pub use crate::math::kernel::{Geometry, Kernel, KernelWeight, SmoothingTensor, WeightEvaluator};
pub use crate::math::linalg::FloatLinalg;
pub use crate::primitives::backend::SolverBackend;
pub use crate::primitives::errors::MeshfreeError;
pub use crate::primitives::point::Point;
pub use crate::primitives::swarm::{PointCloud, Swarm};

/// Fluent builder for configuring an accumulator.
#[derive(Debug, Clone)]
pub struct AccumulateBuilder<T, const D: usize, O = OperatorKind> {
    /// Estimator (default: `LocalRegression`).
    pub estimate: Option<EstimateType>,

    /// Which side carries the smoothing parameters (default: `Gather`).
    pub center: Option<WeightCenter>,

    /// Reconstruction basis (default: `Linear`).
    pub basis: Option<BasisType>,

    /// Kernel per particle.
    pub kernels: Option<Vec<Kernel>>,

    /// Support geometry per particle.
    pub geometries: Option<Vec<Geometry>>,

    /// Smoothing tensor per particle (required).
    pub smoothing: Option<Vec<SmoothingTensor<T>>>,

    /// Operator for `OperatorRegression`.
    pub operator: Option<O>,

    /// Operator domain per owned target.
    pub operator_domains: Option<Vec<Domain>>,

    /// Operator point data per owned target.
    pub operator_data: Option<Vec<Vec<Point<T, D>>>>,

    /// Linear solver hint (default: `Qr`).
    pub solver_backend: Option<SolverBackend>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg, const D: usize> Default for AccumulateBuilder<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg, const D: usize> AccumulateBuilder<T, D> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            estimate: None,
            center: None,
            basis: None,
            kernels: None,
            geometries: None,
            smoothing: None,
            operator: None,
            operator_domains: None,
            operator_data: None,
            solver_backend: None,
            duplicate_param: None,
        }
    }
}

impl<T: FloatLinalg, const D: usize, O: Operator<T, D>> AccumulateBuilder<T, D, O> {
    /// Set the estimator.
    pub fn estimate(mut self, estimate: EstimateType) -> Self {
        if self.estimate.is_some() {
            self.duplicate_param = Some("estimate");
        }
        self.estimate = Some(estimate);
        self
    }

    /// Set the weight center.
    pub fn center(mut self, center: WeightCenter) -> Self {
        if self.center.is_some() {
            self.duplicate_param = Some("center");
        }
        self.center = Some(center);
        self
    }

    /// Set the reconstruction basis.
    ///
    /// - `Unitary` (1 term): corrected kernel density, constants only
    /// - `Linear` (1 + D terms, default): reproduces linear fields
    /// - `Quadratic`: reproduces quadratic fields, needs more neighbors
    pub fn basis(mut self, basis: BasisType) -> Self {
        if self.basis.is_some() {
            self.duplicate_param = Some("basis");
        }
        self.basis = Some(basis);
        self
    }

    /// Set one kernel per particle on the indexing side.
    pub fn kernels(mut self, kernels: Vec<Kernel>) -> Self {
        if self.kernels.is_some() {
            self.duplicate_param = Some("kernels");
        }
        self.kernels = Some(kernels);
        self
    }

    /// Set one support geometry per particle on the indexing side.
    pub fn geometries(mut self, geometries: Vec<Geometry>) -> Self {
        if self.geometries.is_some() {
            self.duplicate_param = Some("geometries");
        }
        self.geometries = Some(geometries);
        self
    }

    /// Set one smoothing tensor per particle on the indexing side.
    pub fn smoothing(mut self, smoothing: Vec<SmoothingTensor<T>>) -> Self {
        if self.smoothing.is_some() {
            self.duplicate_param = Some("smoothing");
        }
        self.smoothing = Some(smoothing);
        self
    }

    /// Set the operator applied under `OperatorRegression`.
    pub fn operator(mut self, operator: O) -> Self {
        if self.operator.is_some() {
            self.duplicate_param = Some("operator");
        }
        self.operator = Some(operator);
        self
    }

    /// Replace the operator with one of another type.
    pub fn custom_operator<P: Operator<T, D>>(self, operator: P) -> AccumulateBuilder<T, D, P> {
        let duplicate_param = if self.operator.is_some() {
            Some("operator")
        } else {
            self.duplicate_param
        };
        AccumulateBuilder {
            estimate: self.estimate,
            center: self.center,
            basis: self.basis,
            kernels: self.kernels,
            geometries: self.geometries,
            smoothing: self.smoothing,
            operator: Some(operator),
            operator_domains: self.operator_domains,
            operator_data: self.operator_data,
            solver_backend: self.solver_backend,
            duplicate_param,
        }
    }

    /// Set one operator domain per owned target.
    pub fn operator_domains(mut self, domains: Vec<Domain>) -> Self {
        if self.operator_domains.is_some() {
            self.duplicate_param = Some("operator_domains");
        }
        self.operator_domains = Some(domains);
        self
    }

    /// Set the operator point data per owned target.
    pub fn operator_data(mut self, data: Vec<Vec<Point<T, D>>>) -> Self {
        if self.operator_data.is_some() {
            self.duplicate_param = Some("operator_data");
        }
        self.operator_data = Some(data);
        self
    }

    /// Set the linear solver hint.
    pub fn solver_backend(mut self, backend: SolverBackend) -> Self {
        if self.solver_backend.is_some() {
            self.duplicate_param = Some("solver_backend");
        }
        self.solver_backend = Some(backend);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build an accumulator with the reference kernel weights.
    pub fn build<'a, S, G>(
        self,
        source: &'a S,
        target: &'a G,
    ) -> Result<Accumulator<'a, T, S, G, D, KernelWeight, O>, MeshfreeError>
    where
        S: Swarm<T, D>,
        G: Swarm<T, D>,
    {
        self.build_with(source, target, KernelWeight)
    }

    /// Build an accumulator with a custom weight evaluator.
    pub fn build_with<'a, S, G, W>(
        self,
        source: &'a S,
        target: &'a G,
        weight_eval: W,
    ) -> Result<Accumulator<'a, T, S, G, D, W, O>, MeshfreeError>
    where
        S: Swarm<T, D>,
        G: Swarm<T, D>,
        W: WeightEvaluator<T, D>,
    {
        let config = self.into_config(source.particle_count(), target.owned_particle_count())?;
        Accumulator::new(source, target, weight_eval, config)
    }

    /// Resolve defaults into a configuration for the given swarm sizes.
    pub fn into_config(
        self,
        source_count: usize,
        target_owned: usize,
    ) -> Result<AccumulateConfig<T, D, O>, MeshfreeError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let estimate = self.estimate.unwrap_or_default();
        let center = self.center.unwrap_or_default();
        let smoothing = self
            .smoothing
            .ok_or(MeshfreeError::MissingParameter("smoothing"))?;
        let count = match center {
            WeightCenter::Gather => target_owned,
            WeightCenter::Scatter => source_count,
        };

        let (operator_domains, operator_data) = if estimate == EstimateType::OperatorRegression {
            let data = self
                .operator_data
                .ok_or(MeshfreeError::MissingParameter("operator_data"))?;
            let domains = self
                .operator_domains
                .unwrap_or_else(|| vec![Domain::Point; target_owned]);
            (domains, data)
        } else {
            (
                self.operator_domains.unwrap_or_default(),
                self.operator_data.unwrap_or_default(),
            )
        };

        Ok(AccumulateConfig {
            estimate,
            center,
            kernels: self.kernels.unwrap_or_else(|| vec![Kernel::default(); count]),
            geometries: self
                .geometries
                .unwrap_or_else(|| vec![Geometry::default(); count]),
            smoothing,
            basis: self.basis.unwrap_or_default(),
            operator: self.operator,
            operator_domains,
            operator_data,
            solver_backend: self.solver_backend.unwrap_or_default(),
        })
    }
}
