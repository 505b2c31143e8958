//! Family Analysis and Comparison

use crate::categories::{CategoryRole, CategoryTable};
use crate::outcome::AnalysisOutcome;
use pqbench_core::{AlgorithmResult, Family};
use pqbench_stats::compute_summary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Algorithm and time picked from a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePick {
    /// Algorithm identifier
    pub algorithm: String,
    /// Total time in milliseconds
    pub time_ms: f64,
}

/// Algorithm and size picked from a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePick {
    /// Algorithm identifier
    pub algorithm: String,
    /// Total bandwidth in bytes
    pub bytes: u64,
}

/// Breakdown of one scheme category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInsight {
    /// Category name with role suffix
    pub category: String,
    /// Matching algorithms
    pub count: usize,
    /// Mean total time of the matching algorithms
    pub mean_time_ms: f64,
    /// Generated observation
    pub observation: String,
    /// Fixed guidance, when the category has one
    pub recommendation: Option<String>,
}

/// Standardisation status of post-quantum schemes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NistStatus {
    /// Standardised schemes
    pub standardized: Vec<String>,
    /// Context
    pub note: String,
}

impl Default for NistStatus {
    fn default() -> Self {
        Self {
            standardized: vec![
                "ML-KEM (Kyber)".to_string(),
                "ML-DSA (Dilithium)".to_string(),
                "SLH-DSA (SPHINCS+)".to_string(),
            ],
            note: "NIST has standardized ML-KEM and ML-DSA for general use. \
                   Falcon may be standardized for specific use cases."
                .to_string(),
        }
    }
}

/// Analysis of one family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyAnalysis {
    /// Family analysed
    pub family: Family,
    /// Heading
    pub title: String,
    /// Algorithms in batch order
    pub algorithms: Vec<String>,
    /// Fastest total time
    pub fastest: TimePick,
    /// Slowest total time
    pub slowest: TimePick,
    /// Mean total time
    pub average_time_ms: f64,
    /// Smallest bandwidth
    pub smallest: SizePick,
    /// Largest bandwidth
    pub largest: SizePick,
    /// Mean bandwidth, truncated to whole bytes
    pub average_bytes: u64,
    /// Category breakdowns, only for categories with matches
    pub insights: Vec<CategoryInsight>,
    /// Post-quantum standardisation status
    pub nist_status: Option<NistStatus>,
}

impl FamilyAnalysis {
    /// Number of algorithms analysed
    pub fn count(&self) -> usize {
        self.algorithms.len()
    }
}

/// First row with the smallest key
pub(crate) fn first_min_by<'a, T, K: PartialOrd>(
    rows: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
) -> Option<&'a T>
where
    T: 'a,
{
    rows.into_iter().fold(None, |best: Option<&'a T>, row| match best {
        Some(b) if key(b) <= key(row) => Some(b),
        _ => Some(row),
    })
}

/// First row with the largest key
pub(crate) fn first_max_by<'a, T, K: PartialOrd>(
    rows: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
) -> Option<&'a T>
where
    T: 'a,
{
    rows.into_iter().fold(None, |best: Option<&'a T>, row| match best {
        Some(b) if key(b) >= key(row) => Some(b),
        _ => Some(row),
    })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn in_family(batch: &[AlgorithmResult], family: Family) -> Vec<&AlgorithmResult> {
    batch.iter().filter(|r| r.family == family).collect()
}

/// Analyse one family of a batch
pub fn analyze_family(
    batch: &[AlgorithmResult],
    family: Family,
    table: &CategoryTable,
) -> AnalysisOutcome<FamilyAnalysis> {
    let rows = in_family(batch, family);
    let (Some(fastest), Some(slowest), Some(smallest), Some(largest)) = (
        first_min_by(rows.iter().copied(), |r| r.total_time_ms()),
        first_max_by(rows.iter().copied(), |r| r.total_time_ms()),
        first_min_by(rows.iter().copied(), |r| r.total_bandwidth_bytes()),
        first_max_by(rows.iter().copied(), |r| r.total_bandwidth_bytes()),
    ) else {
        return AnalysisOutcome::insufficient(format!("No {} algorithms found in dataset", family));
    };

    let roles: &[CategoryRole] = match family {
        Family::Classic => &[CategoryRole::Classic],
        Family::PostQuantum => &[CategoryRole::Kem, CategoryRole::Signature],
    };
    let insights = roles
        .iter()
        .flat_map(|&role| table.by_role(role))
        .filter_map(|category| {
            let matching: Vec<_> = rows
                .iter()
                .filter(|r| category.matches(&r.algorithm))
                .collect();
            if matching.is_empty() {
                return None;
            }
            let mean_time_ms = mean(matching.iter().map(|r| r.total_time_ms()));
            let mut observation = format!(
                "Found {} {} variant(s). Average time: {:.2}ms",
                matching.len(),
                category.label,
                mean_time_ms
            );
            if let Some(note) = &category.note {
                observation.push_str(". ");
                observation.push_str(note);
            }
            Some(CategoryInsight {
                category: category.display_name(),
                count: matching.len(),
                mean_time_ms,
                observation,
                recommendation: category.recommendation.clone(),
            })
        })
        .collect();

    let title = match family {
        Family::Classic => "Classical Algorithms Analysis",
        Family::PostQuantum => "Post-Quantum Algorithms Analysis",
    };

    AnalysisOutcome::Ready(FamilyAnalysis {
        family,
        title: title.to_string(),
        algorithms: rows.iter().map(|r| r.algorithm.clone()).collect(),
        fastest: TimePick {
            algorithm: fastest.algorithm.clone(),
            time_ms: fastest.total_time_ms(),
        },
        slowest: TimePick {
            algorithm: slowest.algorithm.clone(),
            time_ms: slowest.total_time_ms(),
        },
        average_time_ms: mean(rows.iter().map(|r| r.total_time_ms())),
        smallest: SizePick {
            algorithm: smallest.algorithm.clone(),
            bytes: smallest.total_bandwidth_bytes(),
        },
        largest: SizePick {
            algorithm: largest.algorithm.clone(),
            bytes: largest.total_bandwidth_bytes(),
        },
        average_bytes: mean(rows.iter().map(|r| r.total_bandwidth_bytes() as f64)) as u64,
        insights,
        nist_status: (family == Family::PostQuantum).then(NistStatus::default),
    })
}

/// Head-to-head timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceComparison {
    /// Mean classic total time
    pub classic_avg_ms: f64,
    /// Mean post-quantum total time
    pub pqc_avg_ms: f64,
    /// classic / pqc (0 when the post-quantum mean is 0)
    pub speedup_factor: f64,
    /// Family with the lower mean time
    pub winner: Family,
    /// Fixed verdict text
    pub verdict: String,
}

/// Head-to-head bandwidth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandwidthComparison {
    /// Mean classic bandwidth, truncated to whole bytes
    pub classic_avg_bytes: u64,
    /// Mean post-quantum bandwidth, truncated to whole bytes
    pub pqc_avg_bytes: u64,
    /// pqc / classic (0 when the classic mean is 0)
    pub size_ratio: f64,
    /// Family with the lower mean bandwidth
    pub winner: Family,
    /// Fixed verdict text
    pub verdict: String,
}

/// Fixed qualitative trade-offs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffs {
    /// Strengths of classic schemes
    pub classic_advantages: Vec<String>,
    /// Weaknesses of classic schemes
    pub classic_disadvantages: Vec<String>,
    /// Strengths of post-quantum schemes
    pub pqc_advantages: Vec<String>,
    /// Weaknesses of post-quantum schemes
    pub pqc_disadvantages: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for TradeOffs {
    fn default() -> Self {
        Self {
            classic_advantages: strings(&[
                "Mature and well-tested",
                "Smaller key and signature sizes (typically)",
                "Hardware acceleration widely available",
                "Better understood security proofs",
            ]),
            classic_disadvantages: strings(&[
                "Vulnerable to quantum computers (Shor's algorithm)",
                "RSA becoming impractical for high security levels",
                "No future-proof quantum resistance",
            ]),
            pqc_advantages: strings(&[
                "Quantum-resistant security",
                "Future-proof for post-quantum era",
                "Some algorithms (Kyber, Dilithium) are very efficient",
                "NIST standardization complete",
            ]),
            pqc_disadvantages: strings(&[
                "Generally larger public keys and ciphertexts",
                "Less mature implementations",
                "Limited hardware acceleration currently",
                "Some algorithms (SPHINCS+) have performance trade-offs",
            ]),
        }
    }
}

/// Classic vs post-quantum comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyComparison {
    /// Classic rows
    pub classic_count: usize,
    /// Post-quantum rows
    pub pqc_count: usize,
    /// Timing comparison
    pub performance: PerformanceComparison,
    /// Bandwidth comparison
    pub bandwidth: BandwidthComparison,
    /// Qualitative trade-offs
    pub trade_offs: TradeOffs,
}

/// Compare the classic and post-quantum families of a batch
pub fn compare_families(batch: &[AlgorithmResult]) -> AnalysisOutcome<FamilyComparison> {
    let classic = in_family(batch, Family::Classic);
    let pqc = in_family(batch, Family::PostQuantum);
    if classic.is_empty() || pqc.is_empty() {
        return AnalysisOutcome::insufficient(
            "Need both Classic and PQC algorithms for comparison",
        );
    }

    let classic_avg_ms = mean(classic.iter().map(|r| r.total_time_ms()));
    let pqc_avg_ms = mean(pqc.iter().map(|r| r.total_time_ms()));
    let classic_faster = classic_avg_ms < pqc_avg_ms;

    let classic_avg_bw = mean(classic.iter().map(|r| r.total_bandwidth_bytes() as f64));
    let pqc_avg_bw = mean(pqc.iter().map(|r| r.total_bandwidth_bytes() as f64));
    let classic_smaller = classic_avg_bw < pqc_avg_bw;

    AnalysisOutcome::Ready(FamilyComparison {
        classic_count: classic.len(),
        pqc_count: pqc.len(),
        performance: PerformanceComparison {
            classic_avg_ms,
            pqc_avg_ms,
            speedup_factor: if pqc_avg_ms > 0.0 {
                classic_avg_ms / pqc_avg_ms
            } else {
                0.0
            },
            winner: if classic_faster {
                Family::Classic
            } else {
                Family::PostQuantum
            },
            verdict: if classic_faster {
                "Classic algorithms are faster on average"
            } else {
                "PQC algorithms are competitive in performance"
            }
            .to_string(),
        },
        bandwidth: BandwidthComparison {
            classic_avg_bytes: classic_avg_bw as u64,
            pqc_avg_bytes: pqc_avg_bw as u64,
            size_ratio: if classic_avg_bw > 0.0 {
                pqc_avg_bw / classic_avg_bw
            } else {
                0.0
            },
            winner: if classic_smaller {
                Family::Classic
            } else {
                Family::PostQuantum
            },
            verdict: if classic_smaller {
                "Classic algorithms have smaller key/signature sizes on average"
            } else {
                "PQC has comparable size overhead"
            }
            .to_string(),
        },
        trade_offs: TradeOffs::default(),
    })
}

/// Distribution of total time within one family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistics {
    /// Mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Sample standard deviation (n - 1), 0 for a single row
    pub std_dev: f64,
    /// Minimum
    pub min: f64,
    /// Maximum
    pub max: f64,
    /// Rows in the group
    pub count: usize,
}

/// Total-time statistics per family present in the batch
pub fn family_statistics(batch: &[AlgorithmResult]) -> BTreeMap<Family, GroupStatistics> {
    let mut groups: BTreeMap<Family, Vec<f64>> = BTreeMap::new();
    for row in batch {
        groups.entry(row.family).or_default().push(row.total_time_ms());
    }

    groups
        .into_iter()
        .map(|(family, times)| {
            let summary = compute_summary(&times);
            let n = times.len();
            let std_dev = if n > 1 {
                let var = times
                    .iter()
                    .map(|t| (t - summary.mean).powi(2))
                    .sum::<f64>()
                    / (n - 1) as f64;
                var.sqrt()
            } else {
                0.0
            };
            let stats = GroupStatistics {
                mean: summary.mean,
                median: summary.median,
                std_dev,
                min: summary.min,
                max: summary.max,
                count: n,
            };
            (family, stats)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pqbench_core::{
        AlgorithmKind, ArtifactSizes, OperationStats, OutlierReport, StatisticalSummary,
        Operation, OutlierMethod,
    };

    /// Row whose single operation has the given mean
    pub(crate) fn row(name: &str, family: Family, time_ms: f64, bytes: u64) -> AlgorithmResult {
        let mut operations = BTreeMap::new();
        operations.insert(
            Operation::KeyGen,
            OperationStats {
                summary: StatisticalSummary {
                    mean: time_ms,
                    sample_count: 1,
                    ..Default::default()
                },
                outliers: OutlierReport {
                    count: 0,
                    values: Vec::new(),
                    indices: Vec::new(),
                    percentage: 0.0,
                    lower_bound: time_ms,
                    upper_bound: time_ms,
                    method: OutlierMethod::default(),
                },
            },
        );
        AlgorithmResult {
            algorithm: name.to_string(),
            family,
            kind: AlgorithmKind::Kem,
            iterations: 1,
            operations,
            sizes: ArtifactSizes {
                public_key: bytes,
                secret_key: 0,
                output: 0,
            },
            consistency_score: 100.0,
            duration_ms: time_ms,
        }
    }

    pub(crate) fn mixed_batch() -> Vec<AlgorithmResult> {
        vec![
            row("RSA-2048", Family::Classic, 40.0, 300),
            row("SECP256R1 (P-256)", Family::Classic, 2.0, 100),
            row("ML-KEM-768", Family::PostQuantum, 0.5, 2272),
            row("Kyber512", Family::PostQuantum, 0.3, 1568),
            row("ML-DSA-65", Family::PostQuantum, 1.2, 5261),
        ]
    }

    #[test]
    fn test_analyze_classic() {
        let AnalysisOutcome::Ready(analysis) =
            analyze_family(&mixed_batch(), Family::Classic, &CategoryTable::default())
        else {
            panic!("expected analysis");
        };

        assert_eq!(analysis.count(), 2);
        assert_eq!(analysis.fastest.algorithm, "SECP256R1 (P-256)");
        assert_eq!(analysis.slowest.algorithm, "RSA-2048");
        assert!((analysis.average_time_ms - 21.0).abs() < 1e-12);
        assert_eq!(analysis.average_bytes, 200);
        assert_eq!(analysis.insights.len(), 2);
        assert!(analysis.nist_status.is_none());
    }

    #[test]
    fn test_analyze_pqc_groups_kyber_with_ml_kem() {
        let AnalysisOutcome::Ready(analysis) =
            analyze_family(&mixed_batch(), Family::PostQuantum, &CategoryTable::default())
        else {
            panic!("expected analysis");
        };

        let kem = &analysis.insights[0];
        assert_eq!(kem.category, "ML-KEM/Kyber (KEM)");
        assert_eq!(kem.count, 2);
        assert!((kem.mean_time_ms - 0.4).abs() < 1e-12);
        assert_eq!(analysis.insights[1].category, "ML-DSA/Dilithium (Signature)");
        assert!(analysis.nist_status.is_some());
    }

    #[test]
    fn test_missing_family_is_insufficient() {
        let batch = vec![row("RSA-2048", Family::Classic, 40.0, 300)];
        let outcome = analyze_family(&batch, Family::PostQuantum, &CategoryTable::default());
        assert!(!outcome.is_ready());
        assert!(outcome.reason().unwrap().contains("Post-Quantum"));

        let comparison = compare_families(&batch);
        assert_eq!(
            comparison.reason(),
            Some("Need both Classic and PQC algorithms for comparison")
        );
    }

    #[test]
    fn test_compare_families() {
        let AnalysisOutcome::Ready(cmp) = compare_families(&mixed_batch()) else {
            panic!("expected comparison");
        };

        assert_eq!(cmp.classic_count, 2);
        assert_eq!(cmp.pqc_count, 3);
        assert!((cmp.performance.classic_avg_ms - 21.0).abs() < 1e-12);
        assert!((cmp.performance.speedup_factor - 21.0 / (2.0 / 3.0)).abs() < 1e-9);
        assert_eq!(cmp.performance.winner, Family::PostQuantum);
        assert_eq!(cmp.bandwidth.winner, Family::Classic);
        assert_eq!(cmp.bandwidth.classic_avg_bytes, 200);
        assert_eq!(cmp.bandwidth.pqc_avg_bytes, 3033);
        assert_eq!(
            cmp.bandwidth.verdict,
            "Classic algorithms have smaller key/signature sizes on average"
        );
    }

    #[test]
    fn test_family_statistics() {
        let stats = family_statistics(&mixed_batch());
        let classic = stats[&Family::Classic];
        assert_eq!(classic.count, 2);
        assert!((classic.mean - 21.0).abs() < 1e-12);
        // sample std of [40, 2]
        assert!((classic.std_dev - 722.0f64.sqrt()).abs() < 1e-9);
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_first_min_keeps_earliest_tie() {
        let values = [3, 1, 1, 2];
        let min = first_min_by(values.iter(), |v| *v).unwrap();
        assert!(std::ptr::eq(min, &values[1]));
        let max = first_max_by(values.iter(), |v| *v).unwrap();
        assert!(std::ptr::eq(max, &values[0]));
    }
}
