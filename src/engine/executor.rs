//! Execution engine for batch accumulation.
//!
//! ## Purpose
//!
//! This module runs an `Accumulator` over many target stencils and tallies
//! how many of them came out regular, degenerate or unreliable.
//!
//! ## Design notes
//!
//! * Sequential by default, reusing a single `StencilBuffer`.
//! * With the `parallel` feature, targets are fanned out with rayon and each
//!   worker owns its buffer through `map_init`.
//! * Output order always matches input order.
//!
//! ## Invariants
//!
//! * `report.total()` equals the number of stencils processed.
//! * The first index error aborts the batch.
//!
//! ## Non-goals
//!
//! * This module does not search for neighbors (stencils are given).
//! * This module does not validate configuration (handled by `validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::accumulate::estimator::Accumulator;
use crate::algorithms::accumulate::types::{Accumulation, StencilStatus};
use crate::algorithms::operator::Operator;
use crate::math::kernel::WeightEvaluator;
use crate::math::linalg::FloatLinalg;
use crate::primitives::buffer::StencilBuffer;
use crate::primitives::errors::MeshfreeError;
use crate::primitives::swarm::Swarm;

// ============================================================================
// Report
// ============================================================================

/// Per-batch tally of stencil outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StencilReport {
    /// Targets solved normally.
    pub regular: usize,
    /// Targets with fewer neighbors than basis functions.
    pub degenerate: usize,
    /// Targets whose moment matrix was singular or ill-conditioned.
    pub unreliable: usize,
    /// Sum of `bad_solves` over unreliable targets.
    pub bad_solves: usize,
}

impl StencilReport {
    /// Count one stencil.
    pub fn record(&mut self, status: StencilStatus) {
        match status {
            StencilStatus::Regular => self.regular += 1,
            StencilStatus::Degenerate => self.degenerate += 1,
            StencilStatus::Unreliable { bad_solves } => {
                self.unreliable += 1;
                self.bad_solves += bad_solves;
            }
        }
    }

    /// Number of stencils counted.
    pub fn total(&self) -> usize {
        self.regular + self.degenerate + self.unreliable
    }

    /// Whether every stencil was solved normally.
    pub fn all_regular(&self) -> bool {
        self.regular == self.total()
    }
}

/// Accumulations of a batch plus their report.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput<T> {
    /// One accumulation per input stencil, in input order.
    pub accumulations: Vec<Accumulation<T>>,
    /// Outcome tally.
    pub report: StencilReport,
}

impl<T> BatchOutput<T> {
    fn from_accumulations(accumulations: Vec<Accumulation<T>>) -> Self {
        let mut report = StencilReport::default();
        for acc in &accumulations {
            report.record(acc.status);
        }
        if report.unreliable > 0 {
            log::warn!(
                "{} of {} targets have unreliable weights ({} bad solves)",
                report.unreliable,
                report.total(),
                report.bad_solves
            );
        }
        log::debug!(
            "batch done: {} regular, {} degenerate, {} unreliable",
            report.regular,
            report.degenerate,
            report.unreliable
        );
        Self {
            accumulations,
            report,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs an accumulator over every `(target, neighbors)` stencil.
#[cfg(not(feature = "parallel"))]
pub fn accumulate_all<T, S, G, const D: usize, W, O>(
    accumulator: &Accumulator<'_, T, S, G, D, W, O>,
    stencils: &[(usize, Vec<usize>)],
) -> Result<BatchOutput<T>, MeshfreeError>
where
    T: FloatLinalg,
    S: Swarm<T, D>,
    G: Swarm<T, D>,
    W: WeightEvaluator<T, D>,
    O: Operator<T, D>,
{
    accumulate_sequential(accumulator, stencils)
}

/// Runs an accumulator over every `(target, neighbors)` stencil in parallel.
#[cfg(feature = "parallel")]
pub fn accumulate_all<T, S, G, const D: usize, W, O>(
    accumulator: &Accumulator<'_, T, S, G, D, W, O>,
    stencils: &[(usize, Vec<usize>)],
) -> Result<BatchOutput<T>, MeshfreeError>
where
    T: FloatLinalg,
    S: Swarm<T, D> + Sync,
    G: Swarm<T, D> + Sync,
    W: WeightEvaluator<T, D> + Sync,
    O: Operator<T, D> + Sync,
{
    let nbasis = accumulator.nbasis();
    let accumulations = stencils
        .par_iter()
        .map_init(
            || StencilBuffer::new(0, nbasis),
            |buffer, (target, neighbors)| {
                accumulator.accumulate_with_buffer(*target, neighbors, buffer)
            },
        )
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BatchOutput::from_accumulations(accumulations))
}

/// Runs an accumulator over every stencil on the calling thread.
pub fn accumulate_sequential<T, S, G, const D: usize, W, O>(
    accumulator: &Accumulator<'_, T, S, G, D, W, O>,
    stencils: &[(usize, Vec<usize>)],
) -> Result<BatchOutput<T>, MeshfreeError>
where
    T: FloatLinalg,
    S: Swarm<T, D>,
    G: Swarm<T, D>,
    W: WeightEvaluator<T, D>,
    O: Operator<T, D>,
{
    let max_neighbors = stencils.iter().map(|(_, n)| n.len()).max().unwrap_or(0);
    let mut buffer = StencilBuffer::new(max_neighbors, accumulator.nbasis());
    let accumulations = stencils
        .iter()
        .map(|(target, neighbors)| {
            accumulator.accumulate_with_buffer(*target, neighbors, &mut buffer)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BatchOutput::from_accumulations(accumulations))
}
