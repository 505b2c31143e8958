//! Summary Statistics
//!
//! Every field is computed from ALL samples. Outlier detection is advisory
//! and never removes values from a summary.

use crate::percentiles::percentile_of_sorted;
use serde::{Deserialize, Serialize};

/// Distributional summary of one sample set
///
/// The `Default` value (all zero) is the defined summary of an empty sample set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    /// Arithmetic mean
    pub mean: f64,
    /// 50th percentile
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// 25th percentile
    pub p25: f64,
    /// 75th percentile
    pub p75: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Coefficient of variation (std-dev / mean, 0 when mean <= 0)
    pub cv: f64,
    /// Interquartile range (p75 - p25)
    pub iqr: f64,
    /// Number of samples summarised
    pub sample_count: usize,
}

impl StatisticalSummary {
    /// Timing repeatability in [0, 100]; 100 means no relative variance
    pub fn consistency_score(&self) -> f64 {
        score_from_cv(self.cv)
    }

    /// Check if the distribution appears stable (CV below threshold)
    pub fn is_stable(&self, cv_threshold: f64) -> bool {
        self.cv < cv_threshold
    }

    /// Whether this summary describes an empty sample set
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// Compute the summary of a sample set
///
/// # Examples
///
/// ```
/// # use pqbench_stats::compute_summary;
/// let summary = compute_summary(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(summary.mean, 5.0);
/// assert_eq!(summary.std_dev, 2.0);
/// ```
pub fn compute_summary(samples: &[f64]) -> StatisticalSummary {
    if samples.is_empty() {
        return StatisticalSummary::default();
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let p25 = percentile_of_sorted(&sorted, 25.0);
    let p75 = percentile_of_sorted(&sorted, 75.0);

    StatisticalSummary {
        mean,
        median: percentile_of_sorted(&sorted, 50.0),
        std_dev,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        p25,
        p75,
        p95: percentile_of_sorted(&sorted, 95.0),
        p99: percentile_of_sorted(&sorted, 99.0),
        cv: coefficient_of_variation(std_dev, mean),
        iqr: p75 - p25,
        sample_count: samples.len(),
    }
}

/// Relative standard deviation; 0 when the mean is not positive
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> f64 {
    if mean > 0.0 { std_dev / mean } else { 0.0 }
}

/// Consistency score of a sample set: `max(0, 100 - 100 * cv)` to two decimals
pub fn consistency_score(samples: &[f64]) -> f64 {
    compute_summary(samples).consistency_score()
}

fn score_from_cv(cv: f64) -> f64 {
    let score = (100.0 - cv * 100.0).max(0.0);
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert!((summary.median - 3.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.p25, 2.0);
        assert_eq!(summary.p75, 4.0);
        assert_eq!(summary.iqr, 2.0);
        assert_eq!(summary.sample_count, 5);
    }

    #[test]
    fn test_outliers_are_kept() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 115.0 / 6.0).abs() < 1e-9);
        assert_eq!(summary.max, 100.0);
        assert!(summary.p99 > 90.0);
    }

    #[test]
    fn test_empty_samples_all_zero() {
        let summary = compute_summary(&[]);
        assert_eq!(summary, StatisticalSummary::default());
        assert!(summary.is_empty());
        assert_eq!(summary.consistency_score(), 100.0);
    }

    #[test]
    fn test_order_invariant() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let len = rng.gen_range(1..40);
            let samples: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..500.0)).collect();
            let s = compute_summary(&samples);
            assert!(s.min <= s.p25);
            assert!(s.p25 <= s.median);
            assert!(s.median <= s.p75);
            assert!(s.p75 <= s.max);
        }
    }

    #[test]
    fn test_coefficient_of_variation() {
        assert_eq!(coefficient_of_variation(5.0, 0.0), 0.0);
        assert_eq!(coefficient_of_variation(5.0, -1.0), 0.0);
        assert!((coefficient_of_variation(5.0, 50.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_constant_samples_fully_consistent() {
        for len in 1..10 {
            let samples = vec![3.25; len];
            assert_eq!(consistency_score(&samples), 100.0);
        }
    }

    #[test]
    fn test_consistency_rounding_and_clamp() {
        // mean 10, population std 1 -> cv 0.1 -> 90.00
        let samples = vec![9.0, 11.0];
        assert_eq!(consistency_score(&samples), 90.0);

        // cv well above 1 clamps to zero
        let wild = vec![0.001, 0.001, 0.001, 100.0];
        assert_eq!(consistency_score(&wild), 0.0);
    }

    #[test]
    fn test_consistency_non_increasing_with_spread() {
        let mut previous = f64::INFINITY;
        for step in 0..30 {
            let spread = step as f64 * 2.0;
            let samples = vec![100.0 - spread, 100.0, 100.0 + spread];
            let score = consistency_score(&samples);
            assert!((0.0..=100.0).contains(&score));
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_is_stable() {
        let summary = compute_summary(&[100.0, 101.0, 99.0]);
        assert!(summary.is_stable(0.05));
        assert!(!summary.is_stable(0.0));
    }
}
