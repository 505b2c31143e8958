//! Efficiency Ranking and Best Performers
//!
//! All functions here take the complete, finalised batch. Nothing is cached:
//! a batch with different membership must be ranked again.

use crate::family::first_min_by;
use pqbench_core::{AlgorithmResult, Family};
use pqbench_stats::{EfficiencyWeights, efficiency_scores};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of the efficiency ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyEntry {
    /// Position of the row in the ranked batch
    pub index: usize,
    /// Algorithm identifier
    pub algorithm: String,
    /// Classic or post-quantum
    pub family: Family,
    /// Sum of per-operation means
    pub total_time_ms: f64,
    /// Public key plus output bytes
    pub total_bandwidth_bytes: u64,
    /// Weighted normalised score in [0, 100]; lower is better
    pub score: f64,
    /// 1 for the most efficient row
    pub rank: usize,
}

/// Score and rank every row of a batch, most efficient first
///
/// Rows with equal scores keep their batch order.
pub fn rank_efficiency(
    batch: &[AlgorithmResult],
    weights: EfficiencyWeights,
) -> Vec<EfficiencyEntry> {
    let points: Vec<(f64, f64)> = batch
        .iter()
        .map(|r| (r.total_time_ms(), r.total_bandwidth_bytes() as f64))
        .collect();
    let scores = efficiency_scores(&points, weights);

    let mut entries: Vec<EfficiencyEntry> = batch
        .iter()
        .zip(scores)
        .enumerate()
        .map(|(index, (r, score))| EfficiencyEntry {
            index,
            algorithm: r.algorithm.clone(),
            family: r.family,
            total_time_ms: r.total_time_ms(),
            total_bandwidth_bytes: r.total_bandwidth_bytes(),
            score,
            rank: 0,
        })
        .collect();
    entries.sort_by(|a, b| a.score.total_cmp(&b.score));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    debug!(rows = entries.len(), "ranked batch by efficiency");
    entries
}

/// An algorithm picked for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    /// Algorithm identifier
    pub algorithm: String,
    /// Classic or post-quantum
    pub family: Family,
    /// Metric value
    pub value: f64,
}

/// Best rows of a batch on each axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPerformers {
    /// Lowest total time
    pub fastest: Performer,
    /// Lowest total bandwidth
    pub smallest: Performer,
}

/// Fastest and smallest rows; `None` for an empty batch
pub fn best_performers(batch: &[AlgorithmResult]) -> Option<BestPerformers> {
    let fastest = first_min_by(batch, |r| r.total_time_ms())?;
    let smallest = first_min_by(batch, |r| r.total_bandwidth_bytes())?;
    Some(BestPerformers {
        fastest: Performer {
            algorithm: fastest.algorithm.clone(),
            family: fastest.family,
            value: fastest.total_time_ms(),
        },
        smallest: Performer {
            algorithm: smallest.algorithm.clone(),
            family: smallest.family,
            value: smallest.total_bandwidth_bytes() as f64,
        },
    })
}

/// Total time of one row relative to a baseline row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupEntry {
    /// Algorithm identifier
    pub algorithm: String,
    /// Classic or post-quantum
    pub family: Family,
    /// Sum of per-operation means
    pub total_time_ms: f64,
    /// baseline / time (0 when time is 0)
    pub speedup: f64,
    /// 100 * (time - baseline) / baseline (0 when baseline is 0)
    pub percent_difference: f64,
}

/// Speedups against the row named `baseline`; `None` if it is not in the batch
pub fn speedup_against(batch: &[AlgorithmResult], baseline: &str) -> Option<Vec<SpeedupEntry>> {
    let base = batch.iter().find(|r| r.algorithm == baseline)?.total_time_ms();

    Some(
        batch
            .iter()
            .map(|r| {
                let time = r.total_time_ms();
                SpeedupEntry {
                    algorithm: r.algorithm.clone(),
                    family: r.family,
                    total_time_ms: time,
                    speedup: if time > 0.0 { base / time } else { 0.0 },
                    percent_difference: if base > 0.0 {
                        100.0 * (time - base) / base
                    } else {
                        0.0
                    },
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::tests::{mixed_batch, row};

    #[test]
    fn test_rank_extremes() {
        let batch = vec![
            row("A", Family::Classic, 1.0, 100),
            row("B", Family::PostQuantum, 5.0, 500),
            row("C", Family::PostQuantum, 10.0, 1000),
        ];
        let ranked = rank_efficiency(&batch, EfficiencyWeights::default());

        assert_eq!(ranked[0].algorithm, "A");
        assert_eq!(ranked[0].rank, 1);
        assert!(ranked[0].score.abs() < f64::EPSILON);
        assert_eq!(ranked[2].algorithm, "C");
        assert!((ranked[2].score - 100.0).abs() < 1e-9);
        assert!(ranked.iter().all(|e| (0.0..=100.0).contains(&e.score)));
    }

    #[test]
    fn test_rank_recomputed_for_new_batch() {
        let mut batch = vec![
            row("A", Family::Classic, 1.0, 100),
            row("B", Family::PostQuantum, 5.0, 500),
        ];
        let before = rank_efficiency(&batch, EfficiencyWeights::default());
        assert!((before[1].score - 100.0).abs() < 1e-9);

        batch.push(row("C", Family::PostQuantum, 9.0, 900));
        let after = rank_efficiency(&batch, EfficiencyWeights::default());
        let b = after.iter().find(|e| e.algorithm == "B").unwrap();
        assert!((b.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_degenerate_batch() {
        let batch = vec![
            row("A", Family::Classic, 2.0, 100),
            row("B", Family::Classic, 2.0, 100),
        ];
        let ranked = rank_efficiency(&batch, EfficiencyWeights::default());
        assert!(ranked.iter().all(|e| e.score == 0.0));
        assert_eq!(ranked[0].algorithm, "A");
    }

    #[test]
    fn test_rank_keeps_batch_index() {
        let batch = vec![
            row("RSA-2048", Family::Classic, 9.0, 900),
            row("RSA-2048", Family::Classic, 1.0, 100),
        ];
        let ranked = rank_efficiency(&batch, EfficiencyWeights::default());
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].index, 0);
        assert!((ranked[1].score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_performers() {
        let best = best_performers(&mixed_batch()).unwrap();
        assert_eq!(best.fastest.algorithm, "Kyber512");
        assert_eq!(best.smallest.algorithm, "SECP256R1 (P-256)");
        assert!(best_performers(&[]).is_none());
    }

    #[test]
    fn test_speedup_against_baseline() {
        let entries = speedup_against(&mixed_batch(), "RSA-2048").unwrap();
        let ecc = entries.iter().find(|e| e.algorithm == "SECP256R1 (P-256)").unwrap();
        assert!((ecc.speedup - 20.0).abs() < 1e-12);
        assert!((ecc.percent_difference + 95.0).abs() < 1e-9);
        assert!(speedup_against(&mixed_batch(), "RSA-8192").is_none());
    }
}
