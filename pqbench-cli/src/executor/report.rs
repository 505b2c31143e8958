//! Report Building
//!
//! Constructs the complete report from the reduced batch.
//!
//! ## Pipeline
//!
//! ```text
//!   AlgorithmResult rows + ScenarioResults
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │ Efficiency ranking  │  Batch-relative, over the finished batch only
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │ Comparative analysis│  Families, comparison, recommendations
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │      Report         │  Ready for human/JSON/CSV output
//!   └─────────────────────┘
//! ```

use chrono::Utc;
use pqbench_analysis::{
    CategoryTable, analyze_family, compare_families, executive_summary, family_statistics,
    generate_recommendations, rank_efficiency,
};
use pqbench_core::{AlgorithmResult, Family, TrialFailure};
use pqbench_report::{
    AnalysisSection, FailureInfo, REPORT_SCHEMA_VERSION, Report, ReportConfig, ReportMeta,
    ReportSummary,
};
use pqbench_scenarios::{ScenarioError, ScenarioResult};
use tracing::debug;

/// Everything a report is built from
pub struct ReportInputs<'a> {
    /// Reduced rows of the batch
    pub results: Vec<AlgorithmResult>,
    /// Configurations that failed
    pub failures: &'a [TrialFailure],
    /// Composed scenarios
    pub scenarios: Vec<ScenarioResult>,
    /// Scenarios that failed
    pub scenario_errors: &'a [ScenarioError],
    /// Run settings echoed into the report
    pub config: ReportConfig,
    /// Scheme categories for the family breakdowns
    pub categories: &'a CategoryTable,
    /// Total wall-clock time
    pub total_duration_ms: f64,
}

/// Build a complete Report from a finished batch
///
/// Ranking and analysis run here, once, over the final membership of the
/// batch. The analysis section is omitted when no configuration completed.
pub fn build_report(inputs: ReportInputs<'_>) -> Report {
    let ReportInputs {
        results,
        failures,
        scenarios,
        scenario_errors,
        config,
        categories,
        total_duration_ms,
    } = inputs;

    let efficiency = rank_efficiency(&results, config.efficiency_weights);

    let analysis = if results.is_empty() {
        None
    } else {
        let classic = analyze_family(&results, Family::Classic, categories);
        let post_quantum = analyze_family(&results, Family::PostQuantum, categories);
        let comparison = compare_families(&results);
        let executive_summary =
            executive_summary(results.len(), &classic, &post_quantum, &comparison);
        Some(AnalysisSection {
            family_statistics: family_statistics(&results),
            recommendations: generate_recommendations(&results, config.use_case),
            classic,
            post_quantum,
            comparison,
            executive_summary,
        })
    };

    let summary = ReportSummary::tally(
        &results,
        failures.len(),
        scenarios.len(),
        scenario_errors.len(),
        total_duration_ms,
    );
    debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        scenarios = summary.scenarios,
        "report built"
    );

    let failures = failures
        .iter()
        .map(FailureInfo::from)
        .chain(scenario_errors.iter().map(FailureInfo::from))
        .collect();

    Report {
        meta: ReportMeta {
            schema_version: REPORT_SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            config,
        },
        results,
        efficiency,
        scenarios,
        failures,
        analysis,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqbench_analysis::UseCase;
    use pqbench_core::{
        AlgorithmKind, AlgorithmSpec, Artifact, Operation, OutlierMethod, SampleAccumulator,
        TrialError, TrialOutcome,
    };
    use pqbench_stats::EfficiencyWeights;

    fn row(name: &str, family: Family, ms: f64, bytes: u64) -> AlgorithmResult {
        let spec = AlgorithmSpec::new(name, family, AlgorithmKind::Kem);
        let mut runner = |_: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            Ok(TrialOutcome::default()
                .with_time(Operation::KeyGen, ms)
                .with_time(Operation::Encaps, ms)
                .with_time(Operation::Decaps, ms)
                .with_size(Artifact::PublicKey, bytes)
                .with_size(Artifact::SecretKey, bytes)
                .with_size(Artifact::Output, bytes))
        };
        let samples = SampleAccumulator::new(3)
            .accumulate(&mut runner, &spec)
            .unwrap();
        AlgorithmResult::from_samples(&samples, OutlierMethod::default())
    }

    fn config() -> ReportConfig {
        ReportConfig {
            iterations: 3,
            outlier_method: OutlierMethod::default(),
            efficiency_weights: EfficiencyWeights::default(),
            use_case: UseCase::General,
        }
    }

    #[test]
    fn test_build_report_with_both_families() {
        let results = vec![
            row("ECDH-P256", Family::Classic, 0.1, 65),
            row("ML-KEM-768", Family::PostQuantum, 0.05, 1100),
        ];
        let failures = vec![TrialFailure {
            algorithm: "HQC-128".to_string(),
            trial: 2,
            source: TrialError::Exhausted("HQC-128".to_string()),
        }];
        let table = CategoryTable::default();

        let report = build_report(ReportInputs {
            results,
            failures: &failures,
            scenarios: Vec::new(),
            scenario_errors: &[],
            config: config(),
            categories: &table,
            total_duration_ms: 12.0,
        });

        assert_eq!(report.summary.total_algorithms, 3);
        assert_eq!(report.summary.succeeded, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.failures[0].trial, Some(2));
        assert_eq!(report.efficiency.len(), 2);
        assert_eq!(report.efficiency[0].rank, 1);

        let analysis = report.analysis.unwrap();
        assert!(analysis.classic.is_ready());
        assert!(analysis.post_quantum.is_ready());
        assert!(analysis.comparison.is_ready());
        assert!(analysis.executive_summary.contains("EXECUTIVE SUMMARY"));
    }

    #[test]
    fn test_build_report_single_family() {
        let results = vec![row("ML-KEM-512", Family::PostQuantum, 0.04, 800)];
        let table = CategoryTable::default();

        let report = build_report(ReportInputs {
            results,
            failures: &[],
            scenarios: Vec::new(),
            scenario_errors: &[],
            config: config(),
            categories: &table,
            total_duration_ms: 1.0,
        });

        let analysis = report.analysis.unwrap();
        assert!(!analysis.classic.is_ready());
        assert!(analysis.post_quantum.is_ready());
        assert!(analysis.comparison.reason().is_some());
    }

    #[test]
    fn test_build_report_empty_batch() {
        let table = CategoryTable::default();
        let report = build_report(ReportInputs {
            results: Vec::new(),
            failures: &[],
            scenarios: Vec::new(),
            scenario_errors: &[],
            config: config(),
            categories: &table,
            total_duration_ms: 0.0,
        });
        assert!(report.analysis.is_none());
        assert!(report.efficiency.is_empty());
    }
}
