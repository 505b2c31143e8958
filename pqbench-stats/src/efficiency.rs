//! Efficiency Normalisation
//!
//! Min-max normalises time and size across a whole batch and combines them
//! into a weighted score. Scores are batch-relative: they are only meaningful
//! against the exact batch they were computed from.

use crate::DEFAULT_EFFICIENCY_WEIGHT;
use serde::{Deserialize, Serialize};

/// Relative weight of time and size in the efficiency score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyWeights {
    /// Weight applied to normalised time
    pub time: f64,
    /// Weight applied to normalised size
    pub size: f64,
}

impl Default for EfficiencyWeights {
    fn default() -> Self {
        Self {
            time: DEFAULT_EFFICIENCY_WEIGHT,
            size: DEFAULT_EFFICIENCY_WEIGHT,
        }
    }
}

/// Min-max normalise values into [0, 1]
///
/// A metric with no spread (all values equal) does not discriminate between
/// rows and normalises to 0 everywhere.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;

    if !spread.is_finite() || spread <= 0.0 {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / spread).collect()
}

/// Weighted efficiency score per `(time, size)` point; lower is better
///
/// `score = 100 * (w_time * norm_time + w_size * norm_size)`
///
/// # Examples
///
/// ```
/// # use pqbench_stats::{efficiency_scores, EfficiencyWeights};
/// let scores = efficiency_scores(&[(1.0, 10.0), (3.0, 30.0)], EfficiencyWeights::default());
/// assert_eq!(scores, vec![0.0, 100.0]);
/// ```
pub fn efficiency_scores(points: &[(f64, f64)], weights: EfficiencyWeights) -> Vec<f64> {
    let times: Vec<f64> = points.iter().map(|(t, _)| *t).collect();
    let sizes: Vec<f64> = points.iter().map(|(_, s)| *s).collect();

    let norm_times = min_max_normalize(&times);
    let norm_sizes = min_max_normalize(&sizes);

    norm_times
        .iter()
        .zip(&norm_sizes)
        .map(|(t, s)| 100.0 * (weights.time * t + weights.size * s))
        .collect()
}
