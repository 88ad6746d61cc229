//! Corrected weight estimation for one target particle.
//!
//! ## Purpose
//!
//! This module defines the `Accumulator`, which evaluates kernel weights for a
//! target and its neighbors, assembles and solves the weighted least-squares
//! normal equations, and emits one weight vector per neighbor.
//!
//! ## Design notes
//!
//! * **Stateless calls**: The accumulator only borrows the swarms and owns an
//!   immutable configuration, so `accumulate` can run concurrently on
//!   different targets. Scratch space is passed in explicitly.
//! * **One factorization per target**: All neighbors' shifted basis vectors
//!   form the columns of a single right-hand side, so the moment matrix is
//!   factored once per stencil rather than once per neighbor.
//! * **Distinct failure classes**: Under-determined stencils are zero-filled
//!   and marked `Degenerate`; singular or ill-conditioned solves keep their
//!   least-squares weights and are marked `Unreliable`.
//!
//! ## Key concepts
//!
//! * **Moment matrix**: `M = Σ_n w_n · b_n ⊗ b_n` with `b_n = shift(x, y_n)`.
//! * **Length normalization**: The solve runs on offsets divided per axis by
//!   the stencil's extent, so rank and conditioning do not depend on units;
//!   the coefficients are mapped back afterwards.
//! * **Corrected weight**: `w_n · M⁻¹ b_n`. Component `k` reproduces the Taylor
//!   coefficient `∂^{α_k} f(x)` exactly for polynomial fields of the basis order.
//! * **Operator transform**: `out_j = Σ_k Σ_m c_k · ijet_km · op_mj`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::operator::{Operator, OperatorKind};
use crate::engine::validator::Validator;
use crate::math::basis::Basis;
use crate::math::kernel::{KernelWeight, WeightEvaluator};
use crate::math::linalg::FloatLinalg;
use crate::primitives::buffer::StencilBuffer;
use crate::primitives::errors::MeshfreeError;
use crate::primitives::matrix::Matrix;
use crate::primitives::point::Point;
use crate::primitives::swarm::Swarm;

// Module dependencies
use super::types::{
    AccumulateConfig, Accumulation, EstimateType, StencilStatus, WeightCenter, WeightEntry,
};

/// Computes corrected meshfree weights for target particles.
#[derive(Debug)]
pub struct Accumulator<'a, T, S, G, const D: usize, W = KernelWeight, O = OperatorKind> {
    source: &'a S,
    target: &'a G,
    weight_eval: W,
    config: AccumulateConfig<T, D, O>,
    basis: Basis,
}

impl<'a, T, S, G, const D: usize, W, O> Accumulator<'a, T, S, G, D, W, O>
where
    T: FloatLinalg,
    S: Swarm<T, D>,
    G: Swarm<T, D>,
    W: WeightEvaluator<T, D>,
    O: Operator<T, D>,
{
    /// Validate `config` against the swarms and build the accumulator.
    pub fn new(
        source: &'a S,
        target: &'a G,
        weight_eval: W,
        config: AccumulateConfig<T, D, O>,
    ) -> Result<Self, MeshfreeError> {
        Validator::validate_config(
            &config,
            source.particle_count(),
            target.owned_particle_count(),
        )?;
        let basis = Basis::new(config.basis, D)?;
        log::debug!(
            "accumulator ready: {:?} {:?}, {:?} basis ({} terms), {} sources, {} owned targets",
            config.estimate,
            config.center,
            config.basis,
            basis.size(),
            source.particle_count(),
            target.owned_particle_count()
        );
        Ok(Self {
            source,
            target,
            weight_eval,
            config,
            basis,
        })
    }

    /// The configuration this accumulator was built with.
    #[inline]
    pub fn config(&self) -> &AccumulateConfig<T, D, O> {
        &self.config
    }

    /// The resolved reconstruction basis.
    #[inline]
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Number of basis functions.
    #[inline]
    pub fn nbasis(&self) -> usize {
        self.basis.size()
    }

    /// Length of the weight vectors produced for `target`.
    pub fn output_size(&self, target: usize) -> Result<usize, MeshfreeError> {
        self.check_target(target)?;
        Ok(match self.config.estimate {
            EstimateType::KernelDensity => 1,
            EstimateType::LocalRegression => self.nbasis(),
            EstimateType::OperatorRegression => match self.config.operator.as_ref() {
                Some(op) => op.output_size(self.config.basis, self.config.operator_domains[target]),
                None => self.nbasis(),
            },
        })
    }

    // ========================================================================
    // Weights
    // ========================================================================

    /// Kernel weight of `source_idx` in the stencil of `target_idx`.
    pub fn weight(&self, target_idx: usize, source_idx: usize) -> Result<T, MeshfreeError> {
        self.check_target(target_idx)?;
        self.check_sources(&[source_idx])?;
        let x = self.target.coordinates(target_idx);
        let y = self.source.coordinates(source_idx);
        Ok(self.pair_weight(target_idx, source_idx, &x, &y))
    }

    fn pair_weight(&self, target: usize, source: usize, x: &Point<T, D>, y: &Point<T, D>) -> T {
        let cfg = &self.config;
        match cfg.center {
            WeightCenter::Gather => self.weight_eval.evaluate(
                cfg.geometries[target],
                cfg.kernels[target],
                x,
                y,
                &cfg.smoothing[target],
            ),
            // Faceted supports are asymmetric: center on the source.
            WeightCenter::Scatter => self.weight_eval.evaluate(
                cfg.geometries[source],
                cfg.kernels[source],
                y,
                x,
                &cfg.smoothing[source],
            ),
        }
    }

    // ========================================================================
    // Accumulation
    // ========================================================================

    /// Corrected weights of every neighbor of `target`.
    pub fn accumulate(
        &self,
        target: usize,
        neighbors: &[usize],
    ) -> Result<Accumulation<T>, MeshfreeError> {
        let mut buffer = StencilBuffer::new(neighbors.len(), self.nbasis());
        self.accumulate_with_buffer(target, neighbors, &mut buffer)
    }

    /// Same as `accumulate`, reusing caller-provided scratch space.
    pub fn accumulate_with_buffer(
        &self,
        target: usize,
        neighbors: &[usize],
        buffer: &mut StencilBuffer<T>,
    ) -> Result<Accumulation<T>, MeshfreeError> {
        self.check_target(target)?;
        self.check_sources(neighbors)?;
        let x = self.target.coordinates(target);

        let (entries, status) = match self.config.estimate {
            EstimateType::KernelDensity => {
                let entries = neighbors
                    .iter()
                    .map(|&n| WeightEntry {
                        neighbor: n,
                        weights: vec![self.pair_weight(target, n, &x, &self.source.coordinates(n))],
                    })
                    .collect();
                (entries, StencilStatus::Regular)
            }
            EstimateType::LocalRegression => self.regression(target, &x, neighbors, buffer),
            EstimateType::OperatorRegression => {
                let (coefficients, status) = self.regression(target, &x, neighbors, buffer);
                self.apply_operator(target, &x, coefficients, status)?
            }
        };

        log::trace!(
            "target {}: {} neighbors, status {:?}",
            target,
            neighbors.len(),
            status
        );
        if let StencilStatus::Unreliable { bad_solves } = status {
            log::warn!("target {}: {} unreliable neighbor solves", target, bad_solves);
        }

        Ok(Accumulation {
            target,
            entries,
            status,
        })
    }

    /// Moment matrix `Σ w_n · b_n ⊗ b_n` of a stencil.
    pub fn moment_matrix(
        &self,
        target: usize,
        neighbors: &[usize],
    ) -> Result<Matrix<T>, MeshfreeError> {
        self.check_target(target)?;
        self.check_sources(neighbors)?;
        let x = self.target.coordinates(target);
        let mut buffer = StencilBuffer::new(neighbors.len(), self.nbasis());
        self.assemble(target, &x, neighbors, &mut buffer, false);
        let nb = self.nbasis();
        Ok(Matrix::from_fn(nb, nb, |i, j| buffer.moment[i * nb + j]))
    }

    fn regression(
        &self,
        target: usize,
        x: &Point<T, D>,
        neighbors: &[usize],
        buffer: &mut StencilBuffer<T>,
    ) -> (Vec<WeightEntry<T>>, StencilStatus) {
        let nb = self.nbasis();
        let nn = neighbors.len();

        // Under-determined stencil: no reconstruction at this target.
        if nn < nb {
            let entries = neighbors
                .iter()
                .map(|&n| WeightEntry {
                    neighbor: n,
                    weights: vec![T::zero(); nb],
                })
                .collect();
            return (entries, StencilStatus::Degenerate);
        }

        let scale = self.assemble(target, x, neighbors, buffer, true);
        let outcome = T::solve_columns(
            &buffer.moment,
            &buffer.basis,
            nb,
            nn,
            self.config.solver_backend,
        );

        // Undo the length normalization: component k carries Π ℓ_d^{-α_d}.
        let unscale: Vec<T> = self
            .basis
            .exponents()
            .iter()
            .map(|alpha| {
                alpha
                    .iter()
                    .zip(scale.iter())
                    .fold(T::one(), |f, (&p, &l)| f / l.powi(i32::from(p)))
            })
            .collect();

        let entries = neighbors
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let w = buffer.weights[i];
                WeightEntry {
                    neighbor: n,
                    weights: outcome.solution[i * nb..(i + 1) * nb]
                        .iter()
                        .zip(unscale.iter())
                        .map(|(&z, &u)| z * u * w)
                        .collect(),
                }
            })
            .collect();

        let status = if outcome.status.is_ok() {
            StencilStatus::Regular
        } else {
            StencilStatus::Unreliable { bad_solves: nn }
        };
        (entries, status)
    }

    /// Fill `buffer` with kernel weights, shifted bases and the moment matrix.
    ///
    /// With `normalize`, offsets are divided per axis by the largest offset
    /// among weighted neighbors, so the moment matrix of a stencil does not
    /// depend on its length scale. Returns the per-axis lengths used (all
    /// ones without `normalize`).
    fn assemble(
        &self,
        target: usize,
        x: &Point<T, D>,
        neighbors: &[usize],
        buffer: &mut StencilBuffer<T>,
        normalize: bool,
    ) -> [T; D] {
        let nb = self.nbasis();
        buffer.reset(nb, neighbors.len());
        let StencilBuffer {
            weights,
            basis,
            moment,
        } = buffer;

        let mut scale = [T::zero(); D];
        for (i, &n) in neighbors.iter().enumerate() {
            let y = self.source.coordinates(n);
            let w = self.pair_weight(target, n, x, &y);
            weights[i] = w;
            if normalize && w != T::zero() {
                for (l, (&yd, &xd)) in scale.iter_mut().zip(y.0.iter().zip(x.0.iter())) {
                    *l = (*l).max((yd - xd).abs());
                }
            }
        }
        // An axis without spread stays rank deficient whatever its length.
        for l in scale.iter_mut() {
            if !normalize || !(*l > T::zero() && (*l).is_finite()) {
                *l = T::one();
            }
        }

        for (i, &n) in neighbors.iter().enumerate() {
            let y = self.source.coordinates(n);
            let mut offset = [T::zero(); D];
            for (d, o) in offset.iter_mut().enumerate() {
                *o = (y[d] - x[d]) / scale[d];
            }

            let b = &mut basis[i * nb..(i + 1) * nb];
            self.basis.function_into(&offset, b);
            let w = weights[i];
            if w == T::zero() {
                continue;
            }

            // Upper triangle only; mirrored below.
            for r in 0..nb {
                let wr = w * b[r];
                for c in r..nb {
                    moment[r * nb + c] = moment[r * nb + c] + wr * b[c];
                }
            }
        }

        for r in 0..nb {
            for c in 0..r {
                moment[r * nb + c] = moment[c * nb + r];
            }
        }
        scale
    }

    fn apply_operator(
        &self,
        target: usize,
        x: &Point<T, D>,
        coefficients: Vec<WeightEntry<T>>,
        status: StencilStatus,
    ) -> Result<(Vec<WeightEntry<T>>, StencilStatus), MeshfreeError> {
        let cfg = &self.config;
        let operator = cfg.operator.as_ref().ok_or(MeshfreeError::MissingOperator)?;
        let domain = cfg.operator_domains[target];
        let out = operator.output_size(cfg.basis, domain);

        if status == StencilStatus::Degenerate {
            let entries = coefficients
                .into_iter()
                .map(|e| WeightEntry {
                    neighbor: e.neighbor,
                    weights: vec![T::zero(); out],
                })
                .collect();
            return Ok((entries, status));
        }

        let op = operator.apply_basis(cfg.basis, domain, &cfg.operator_data[target])?;
        if op.rows() != self.nbasis() || op.cols() != out {
            return Err(MeshfreeError::InvalidOperatorData(format!(
                "operator returned a {}x{} matrix, expected {}x{}",
                op.rows(),
                op.cols(),
                self.nbasis(),
                out
            )));
        }

        // Re-express the coefficients about x in the global basis, then apply.
        let transform = self.basis.inverse_jet(x.as_slice()).matmul(&op);
        let entries = coefficients
            .into_iter()
            .map(|e| WeightEntry {
                neighbor: e.neighbor,
                weights: transform.vec_mul(&e.weights),
            })
            .collect();
        Ok((entries, status))
    }

    // ========================================================================
    // Index checks
    // ========================================================================

    fn check_target(&self, target: usize) -> Result<(), MeshfreeError> {
        let len = self.target.owned_particle_count();
        if target >= len {
            return Err(MeshfreeError::IndexOutOfBounds {
                what: "target",
                index: target,
                len,
            });
        }
        Ok(())
    }

    fn check_sources(&self, sources: &[usize]) -> Result<(), MeshfreeError> {
        let len = self.source.particle_count();
        match sources.iter().find(|&&s| s >= len) {
            Some(&index) => Err(MeshfreeError::IndexOutOfBounds {
                what: "source",
                index,
                len,
            }),
            None => Ok(()),
        }
    }
}
