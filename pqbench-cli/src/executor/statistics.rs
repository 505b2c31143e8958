//! Statistics Computation
//!
//! Reduces finished sample sets to `AlgorithmResult` rows.
//!
//! Runs only after every trial of the batch has completed, so spreading the
//! work over Rayon's pool cannot disturb a measurement. Each configuration's
//! samples are reduced independently:
//! - Summary statistics per operation
//! - Outlier detection with the configured method
//! - Consistency score over per-trial totals

use pqbench_core::{AccumulatedSamples, AlgorithmResult, OutlierMethod};
use rayon::prelude::*;

/// Compute result rows for accumulated samples (parallelized with Rayon)
///
/// Rows come back in the same order as `samples`.
pub fn compute_statistics(
    samples: &[AccumulatedSamples],
    outlier_method: OutlierMethod,
) -> Vec<AlgorithmResult> {
    samples
        .par_iter()
        .map(|s| AlgorithmResult::from_samples(s, outlier_method))
        .collect()
}
