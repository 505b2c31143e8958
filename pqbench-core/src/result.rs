//! Algorithm Result Rows
//!
//! One row per benchmarked configuration, reduced once from its sample sets.
//! Batch-relative values such as the efficiency score are not stored here;
//! they are derived from a finalised batch elsewhere.

use crate::accumulator::AccumulatedSamples;
use crate::family::Family;
use crate::measurement::Operation;
use crate::trial::AlgorithmKind;
use pqbench_stats::{
    OutlierMethod, OutlierReport, StatisticalSummary, consistency_score, detect_outliers,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Artifact sizes captured once per configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSizes {
    /// Public key bytes
    pub public_key: u64,
    /// Secret key bytes
    pub secret_key: u64,
    /// Ciphertext (KEM) or signature bytes
    pub output: u64,
}

impl ArtifactSizes {
    /// Bytes that cross the wire: public key plus ciphertext or signature
    pub fn bandwidth(&self) -> u64 {
        self.public_key + self.output
    }
}

/// Summary and outlier analysis of one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Distributional summary, outliers included
    pub summary: StatisticalSummary,
    /// Advisory outlier report
    pub outliers: OutlierReport,
}

/// Reduced result of one algorithm configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Algorithm identifier
    pub algorithm: String,
    /// Classic or post-quantum
    pub family: Family,
    /// KEM or signature
    pub kind: AlgorithmKind,
    /// Completed trials
    pub iterations: usize,
    /// Per-operation statistics
    pub operations: BTreeMap<Operation, OperationStats>,
    /// Artifact sizes
    pub sizes: ArtifactSizes,
    /// Repeatability of the per-trial total time, 0 to 100
    pub consistency_score: f64,
    /// Wall-clock duration of accumulation
    pub duration_ms: f64,
}

impl AlgorithmResult {
    /// Reduce accumulated samples into a result row
    pub fn from_samples(samples: &AccumulatedSamples, outlier_method: OutlierMethod) -> Self {
        let operations = samples
            .sample_sets
            .iter()
            .map(|(&op, set)| {
                let stats = OperationStats {
                    summary: set.summarize(),
                    outliers: detect_outliers(set.values(), outlier_method),
                };
                (op, stats)
            })
            .collect();

        Self {
            algorithm: samples.spec.name.clone(),
            family: samples.spec.family,
            kind: samples.spec.kind,
            iterations: samples.totals.len(),
            operations,
            sizes: samples.sizes,
            consistency_score: consistency_score(&samples.totals),
            duration_ms: samples.elapsed_ms,
        }
    }

    /// Statistics of one operation, if it was timed
    pub fn operation(&self, op: Operation) -> Option<&OperationStats> {
        self.operations.get(&op)
    }

    /// Mean milliseconds of one operation, if it was timed
    pub fn mean_ms(&self, op: Operation) -> Option<f64> {
        self.operation(op).map(|s| s.summary.mean)
    }

    /// Sum of per-operation means
    pub fn total_time_ms(&self) -> f64 {
        self.operations.values().map(|s| s.summary.mean).sum()
    }

    /// Public key plus ciphertext or signature bytes
    pub fn total_bandwidth_bytes(&self) -> u64 {
        self.sizes.bandwidth()
    }

    /// Total outliers flagged across operations
    pub fn outlier_count(&self) -> usize {
        self.operations.values().map(|s| s.outliers.count).sum()
    }
}
