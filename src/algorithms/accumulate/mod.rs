//! Meshfree weight accumulation.
//!
//! `types` holds the configuration and result types, `estimator` the
//! `Accumulator` that produces them.

/// Corrected weight estimation.
pub mod estimator;

/// Configuration and result types.
pub mod types;

pub use estimator::Accumulator;
pub use types::{
    AccumulateConfig, Accumulation, EstimateType, StencilStatus, WeightCenter, WeightEntry,
};
