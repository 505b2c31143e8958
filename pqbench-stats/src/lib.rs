#![warn(missing_docs)]
//! pqbench Statistical Engine
//!
//! Reduces raw per-trial timing samples to robust summaries:
//! - Percentile calculation with linear interpolation
//! - Distribution summaries (mean, median, std-dev, CV, IQR) and a consistency score
//! - Outlier detection via IQR or z-score rules (advisory only)
//! - Min-max normalisation and weighted efficiency scores across a batch

mod efficiency;
mod outliers;
mod percentiles;
mod summary;

pub use efficiency::{EfficiencyWeights, efficiency_scores, min_max_normalize};
pub use outliers::{OutlierMethod, OutlierReport, detect_outliers};
pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{
    StatisticalSummary, coefficient_of_variation, compute_summary, consistency_score,
};

/// Default IQR multiplier for outlier bounds
pub const DEFAULT_IQR_THRESHOLD: f64 = 1.5;

/// Default weight applied to both time and bandwidth in efficiency scores
pub const DEFAULT_EFFICIENCY_WEIGHT: f64 = 0.5;
