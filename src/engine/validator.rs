//! Input validation for accumulation configuration.
//!
//! ## Purpose
//!
//! This module checks an `AccumulateConfig` against the swarms it will run
//! on before any weight is computed: per-particle array lengths, smoothing
//! tensor shapes, operator presence and operator domain data.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types and operators.
//!
//! ## Key concepts
//!
//! * **Indexing side**: Under `Gather` the per-particle arrays follow the
//!   owned targets, under `Scatter` they follow the source particles.
//! * **Smoothing shapes**: `Element` and `Tensor` read one row of length 1 or
//!   `D`; `Faceted` reads one row `[normal.., distance]` per facet.
//!
//! ## Invariants
//!
//! * A validated configuration never indexes out of bounds at accumulation time.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not check neighbor lists (checked per call).
//! * This module does not detect singular stencils (reported per target).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::accumulate::types::{AccumulateConfig, EstimateType, WeightCenter};
use crate::algorithms::operator::Operator;
use crate::math::kernel::Geometry;
use crate::primitives::errors::MeshfreeError;
use crate::primitives::point::MAX_DIMENSION;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for accumulation configuration.
///
/// All methods return `Result<(), MeshfreeError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Configuration
    // ========================================================================

    /// Validate a full configuration for `source_count` sources and
    /// `target_owned` owned targets.
    pub fn validate_config<T: Float, const D: usize, O: Operator<T, D>>(
        config: &AccumulateConfig<T, D, O>,
        source_count: usize,
        target_owned: usize,
    ) -> Result<(), MeshfreeError> {
        Self::validate_dimension(D)?;

        let expected = match config.center {
            WeightCenter::Gather => target_owned,
            WeightCenter::Scatter => source_count,
        };
        Self::validate_length("kernels", config.kernels.len(), expected)?;
        Self::validate_length("geometries", config.geometries.len(), expected)?;
        Self::validate_length("smoothing", config.smoothing.len(), expected)?;

        for (i, (geometry, tensor)) in config
            .geometries
            .iter()
            .zip(config.smoothing.iter())
            .enumerate()
        {
            Self::validate_smoothing(i, *geometry, tensor, D)?;
        }

        if config.estimate == EstimateType::OperatorRegression {
            Self::validate_operator(config, target_owned)?;
        }

        Ok(())
    }

    /// Validate the spatial dimension.
    pub fn validate_dimension(dim: usize) -> Result<(), MeshfreeError> {
        if dim == 0 || dim > MAX_DIMENSION {
            return Err(MeshfreeError::UnsupportedDimension(dim));
        }
        Ok(())
    }

    /// Validate that a per-particle array has the expected length.
    pub fn validate_length(
        what: &'static str,
        got: usize,
        expected: usize,
    ) -> Result<(), MeshfreeError> {
        if got != expected {
            return Err(MeshfreeError::MismatchedLengths {
                what,
                got,
                expected,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Smoothing
    // ========================================================================

    /// Validate the smoothing tensor of particle `index`.
    pub fn validate_smoothing<T: Float>(
        index: usize,
        geometry: Geometry,
        tensor: &[Vec<T>],
        dim: usize,
    ) -> Result<(), MeshfreeError> {
        let Some(first) = tensor.first() else {
            return Err(MeshfreeError::InvalidSmoothing(format!(
                "particle {}: empty smoothing tensor",
                index
            )));
        };

        match geometry {
            Geometry::Element | Geometry::Tensor => {
                if first.len() != 1 && first.len() != dim {
                    return Err(MeshfreeError::InvalidSmoothing(format!(
                        "particle {}: {:?} smoothing needs 1 or {} lengths, got {}",
                        index,
                        geometry,
                        dim,
                        first.len()
                    )));
                }
                if first.iter().any(|&h| !(h.is_finite() && h > T::zero())) {
                    return Err(MeshfreeError::InvalidSmoothing(format!(
                        "particle {}: smoothing lengths must be positive and finite",
                        index
                    )));
                }
            }
            Geometry::Faceted => {
                for (f, facet) in tensor.iter().enumerate() {
                    if facet.len() != dim + 1 {
                        return Err(MeshfreeError::InvalidSmoothing(format!(
                            "particle {}: facet {} needs {} entries, got {}",
                            index,
                            f,
                            dim + 1,
                            facet.len()
                        )));
                    }
                    if facet.iter().any(|v| !v.is_finite()) {
                        return Err(MeshfreeError::InvalidSmoothing(format!(
                            "particle {}: facet {} is not finite",
                            index, f
                        )));
                    }
                    if facet[dim] <= T::zero() {
                        return Err(MeshfreeError::InvalidSmoothing(format!(
                            "particle {}: facet {} distance must be positive",
                            index, f
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Operator
    // ========================================================================

    /// Validate operator presence and per-target operator data.
    pub fn validate_operator<T: Float, const D: usize, O: Operator<T, D>>(
        config: &AccumulateConfig<T, D, O>,
        target_owned: usize,
    ) -> Result<(), MeshfreeError> {
        let operator = config
            .operator
            .as_ref()
            .ok_or(MeshfreeError::MissingOperator)?;
        Self::validate_length(
            "operator_domains",
            config.operator_domains.len(),
            target_owned,
        )?;
        Self::validate_length("operator_data", config.operator_data.len(), target_owned)?;

        for (domain, data) in config
            .operator_domains
            .iter()
            .zip(config.operator_data.iter())
        {
            operator.check_data(*domain, data)?;
        }
        Ok(())
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Validate that no builder parameter was set twice.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), MeshfreeError> {
        if let Some(parameter) = duplicate_param {
            return Err(MeshfreeError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
