//! Report Data Structures

use crate::rows::{AlgorithmRow, ScenarioRow};
use chrono::{DateTime, Utc};
use pqbench_analysis::{
    AnalysisOutcome, EfficiencyEntry, FamilyAnalysis, FamilyComparison, GroupStatistics,
    Recommendations, UseCase,
};
use pqbench_core::{AlgorithmResult, Family, OutlierMethod, TrialFailure};
use pqbench_scenarios::{ScenarioError, ScenarioResult};
use pqbench_stats::EfficiencyWeights;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Completed algorithm rows, in execution order
    pub results: Vec<AlgorithmResult>,
    /// Efficiency ranking of `results`
    pub efficiency: Vec<EfficiencyEntry>,
    /// Composed scenarios
    pub scenarios: Vec<ScenarioResult>,
    /// Configurations and scenarios that failed
    pub failures: Vec<FailureInfo>,
    /// Batch analysis, absent when nothing completed
    pub analysis: Option<AnalysisSection>,
    /// Counts
    pub summary: ReportSummary,
}

impl Report {
    /// Flat algorithm rows joined with their efficiency entry by batch position
    pub fn algorithm_rows(&self) -> Vec<AlgorithmRow> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let entry = self.efficiency.iter().find(|e| e.index == i);
                AlgorithmRow::new(r, entry)
            })
            .collect()
    }

    /// Flat scenario rows
    pub fn scenario_rows(&self) -> Vec<ScenarioRow> {
        self.scenarios.iter().map(ScenarioRow::from).collect()
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Layout version
    pub schema_version: u32,
    /// Tool version
    pub version: String,
    /// Report creation time
    pub timestamp: DateTime<Utc>,
    /// Run configuration
    pub config: ReportConfig,
}

/// Configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Trials per algorithm
    pub iterations: usize,
    /// Outlier rule
    pub outlier_method: OutlierMethod,
    /// Efficiency score weights
    pub efficiency_weights: EfficiencyWeights,
    /// Use case for recommendations
    pub use_case: UseCase,
}

/// Batch analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Classic family analysis
    pub classic: AnalysisOutcome<FamilyAnalysis>,
    /// Post-quantum family analysis
    pub post_quantum: AnalysisOutcome<FamilyAnalysis>,
    /// Head-to-head comparison
    pub comparison: AnalysisOutcome<FamilyComparison>,
    /// Total-time distribution per family
    pub family_statistics: BTreeMap<Family, GroupStatistics>,
    /// Use-case recommendations
    pub recommendations: Recommendations,
    /// Plain-text executive summary
    pub executive_summary: String,
}

/// Failure information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Algorithm identifier
    pub algorithm: String,
    /// Configuration or scenario name
    pub context: String,
    /// Zero-based trial index, for trial failures
    pub trial: Option<usize>,
    /// Underlying cause
    pub message: String,
}

impl From<&TrialFailure> for FailureInfo {
    fn from(failure: &TrialFailure) -> Self {
        Self {
            algorithm: failure.algorithm.clone(),
            context: "benchmark".to_string(),
            trial: Some(failure.trial),
            message: failure.source.to_string(),
        }
    }
}

impl From<&ScenarioError> for FailureInfo {
    fn from(error: &ScenarioError) -> Self {
        Self {
            algorithm: error.algorithm.clone(),
            context: error.scenario.label().to_string(),
            trial: None,
            message: error.source.to_string(),
        }
    }
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Configurations attempted
    pub total_algorithms: usize,
    /// Configurations completed
    pub succeeded: usize,
    /// Configurations that failed
    pub failed: usize,
    /// Completed classic rows
    pub classic: usize,
    /// Completed post-quantum rows
    pub post_quantum: usize,
    /// Scenarios composed
    pub scenarios: usize,
    /// Scenarios that failed
    pub scenario_failures: usize,
    /// Total wall-clock time
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Count a finished run
    pub fn tally(
        results: &[AlgorithmResult],
        failed: usize,
        scenarios: usize,
        scenario_failures: usize,
        total_duration_ms: f64,
    ) -> Self {
        let classic = results.iter().filter(|r| r.family == Family::Classic).count();
        Self {
            total_algorithms: results.len() + failed,
            succeeded: results.len(),
            failed,
            classic,
            post_quantum: results.len() - classic,
            scenarios,
            scenario_failures,
            total_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::REPORT_SCHEMA_VERSION;
    use pqbench_analysis::rank_efficiency;
    use pqbench_core::{AlgorithmKind, ArtifactSizes, TrialError};
    use pqbench_scenarios::ScenarioKind;

    fn rsa_row(public_key: u64) -> AlgorithmResult {
        AlgorithmResult {
            algorithm: "RSA-2048".to_string(),
            family: Family::Classic,
            kind: AlgorithmKind::Signature,
            iterations: 0,
            operations: BTreeMap::new(),
            sizes: ArtifactSizes {
                public_key,
                secret_key: 0,
                output: 256,
            },
            consistency_score: 0.0,
            duration_ms: 0.0,
        }
    }

    #[test]
    fn test_algorithm_rows_join_by_position() {
        let results = vec![rsa_row(2000), rsa_row(300)];
        let report = Report {
            meta: ReportMeta {
                schema_version: REPORT_SCHEMA_VERSION,
                version: "test".to_string(),
                timestamp: Utc::now(),
                config: ReportConfig {
                    iterations: 0,
                    outlier_method: OutlierMethod::default(),
                    efficiency_weights: EfficiencyWeights::default(),
                    use_case: UseCase::General,
                },
            },
            efficiency: rank_efficiency(&results, EfficiencyWeights::default()),
            results,
            scenarios: Vec::new(),
            failures: Vec::new(),
            analysis: None,
            summary: ReportSummary::default(),
        };

        let rows = report.algorithm_rows();
        assert_eq!(rows[0].efficiency_rank, Some(2));
        assert_eq!(rows[1].efficiency_rank, Some(1));
        assert_eq!(rows[1].efficiency_score, Some(0.0));
    }

    #[test]
    fn test_failure_info_from_trial() {
        let failure = TrialFailure {
            algorithm: "RSA-15360".to_string(),
            trial: 0,
            source: TrialError::Unsupported("key size".to_string()),
        };
        let info = FailureInfo::from(&failure);
        assert_eq!(info.trial, Some(0));
        assert_eq!(info.context, "benchmark");
        assert!(info.message.contains("key size"));
    }

    #[test]
    fn test_failure_info_from_scenario() {
        let error = ScenarioError {
            scenario: ScenarioKind::VpnSession,
            algorithm: "HQC-256".to_string(),
            source: TrialError::Exhausted("HQC-256".to_string()),
        };
        let info = FailureInfo::from(&error);
        assert_eq!(info.context, "VPN Session");
        assert!(info.trial.is_none());
    }

    #[test]
    fn test_summary_tally() {
        let summary = ReportSummary::tally(&[], 2, 0, 1, 5.0);
        assert_eq!(summary.total_algorithms, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.post_quantum, 0);
    }
}
