//! Outlier Detection
//!
//! Flags anomalous samples using the IQR or z-score rule.
//!
//! Detection is advisory: the input is never modified and every summary
//! statistic still includes the flagged values.

use crate::DEFAULT_IQR_THRESHOLD;
use crate::percentiles::compute_percentile;
use serde::{Deserialize, Serialize};

/// Method for outlier detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Outliers lie outside [Q1 - threshold*IQR, Q3 + threshold*IQR]
    Iqr {
        /// IQR multiplier
        threshold: f64,
    },
    /// Outliers have |x - mean| / std above the threshold
    ZScore {
        /// Number of standard deviations
        threshold: f64,
    },
}

impl Default for OutlierMethod {
    fn default() -> Self {
        OutlierMethod::Iqr {
            threshold: DEFAULT_IQR_THRESHOLD,
        }
    }
}

impl OutlierMethod {
    /// Threshold carried by either method
    pub fn threshold(&self) -> f64 {
        match self {
            OutlierMethod::Iqr { threshold } | OutlierMethod::ZScore { threshold } => *threshold,
        }
    }
}

impl std::fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlierMethod::Iqr { threshold } => write!(f, "iqr (k={})", threshold),
            OutlierMethod::ZScore { threshold } => write!(f, "zscore (z>{})", threshold),
        }
    }
}

/// Result of outlier analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Number of flagged samples
    pub count: usize,
    /// Flagged values, in sample order
    pub values: Vec<f64>,
    /// Indices of flagged samples
    pub indices: Vec<usize>,
    /// 100 * count / total samples (0 for empty input)
    pub percentage: f64,
    /// Lower bound used for detection
    pub lower_bound: f64,
    /// Upper bound used for detection
    pub upper_bound: f64,
    /// Detection method used
    pub method: OutlierMethod,
}

impl OutlierReport {
    fn empty(method: OutlierMethod, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            count: 0,
            values: Vec::new(),
            indices: Vec::new(),
            percentage: 0.0,
            lower_bound,
            upper_bound,
            method,
        }
    }

    /// Check if outlier percentage exceeds threshold (indicates noisy environment)
    pub fn is_noisy(&self, threshold_pct: f64) -> bool {
        self.percentage > threshold_pct
    }
}

/// Detect outliers in samples using the specified method
///
/// # Examples
///
/// ```
/// # use pqbench_stats::{detect_outliers, OutlierMethod};
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
/// let report = detect_outliers(&samples, OutlierMethod::default());
/// assert_eq!(report.count, 1);
/// assert_eq!(report.values, vec![100.0]);
/// ```
pub fn detect_outliers(samples: &[f64], method: OutlierMethod) -> OutlierReport {
    if samples.is_empty() {
        return OutlierReport::empty(method, 0.0, 0.0);
    }

    let (lower_bound, upper_bound) = match method {
        OutlierMethod::Iqr { threshold } => {
            let q1 = compute_percentile(samples, 25.0);
            let q3 = compute_percentile(samples, 75.0);
            let iqr = q3 - q1;
            (q1 - threshold * iqr, q3 + threshold * iqr)
        }
        OutlierMethod::ZScore { threshold } => {
            let n = samples.len() as f64;
            let mean = samples.iter().sum::<f64>() / n;
            let std_dev =
                (samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

            if std_dev == 0.0 {
                // Constant samples: every z-score is 0
                return OutlierReport::empty(method, mean, mean);
            }
            (mean - threshold * std_dev, mean + threshold * std_dev)
        }
    };

    let mut indices = Vec::new();
    let mut values = Vec::new();
    for (i, &sample) in samples.iter().enumerate() {
        if sample < lower_bound || sample > upper_bound {
            indices.push(i);
            values.push(sample);
        }
    }

    let count = indices.len();
    OutlierReport {
        count,
        values,
        indices,
        percentage: count as f64 / samples.len() as f64 * 100.0,
        lower_bound,
        upper_bound,
        method,
    }
}
