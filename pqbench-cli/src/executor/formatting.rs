//! Output Formatting
//!
//! Human-readable output formatting for benchmark reports.
//!
//! Generates terminal-friendly output with:
//! - Per-algorithm timing metrics grouped by primitive kind
//! - The efficiency ranking
//! - Composed scenarios with their phases
//! - Failures, the executive summary and recommendations

use pqbench_core::{AlgorithmKind, AlgorithmResult};
use pqbench_report::Report;
use std::collections::BTreeMap;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("pqbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let mut groups: BTreeMap<AlgorithmKind, Vec<&AlgorithmResult>> = BTreeMap::new();
    for result in &report.results {
        groups.entry(result.kind).or_default().push(result);
    }

    for (kind, results) in groups {
        output.push_str(&format!("Kind: {}\n", kind));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for result in results {
            output.push_str(&format!(
                "  {} [{}]  iterations: {}  consistency: {:.2}\n",
                result.algorithm, result.family, result.iterations, result.consistency_score
            ));
            for (op, stats) in &result.operations {
                let s = &stats.summary;
                output.push_str(&format!(
                    "      {:<7} mean: {:.4} ms  median: {:.4} ms  stddev: {:.4} ms  p95: {:.4} ms\n",
                    op.label(),
                    s.mean,
                    s.median,
                    s.std_dev,
                    s.p95
                ));
                if stats.outliers.count > 0 {
                    output.push_str(&format!(
                        "              outliers: {} ({:.1}%)\n",
                        stats.outliers.count, stats.outliers.percentage
                    ));
                }
            }
            output.push_str(&format!(
                "      sizes: pk {} B  sk {} B  {} {} B\n",
                result.sizes.public_key,
                result.sizes.secret_key,
                kind.output_label(),
                result.sizes.output
            ));
            output.push_str(&format!(
                "      total: {:.4} ms  bandwidth: {} B\n\n",
                result.total_time_ms(),
                result.total_bandwidth_bytes()
            ));
        }
    }

    if !report.efficiency.is_empty() {
        output.push_str("\nEfficiency Ranking\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let width = report
            .efficiency
            .iter()
            .map(|e| e.algorithm.len())
            .max()
            .unwrap_or(20);
        output.push_str(&format!(
            "  {:>4}  {:<width$}  {:>12}  {:>10}  {:>8}\n",
            "Rank",
            "Algorithm",
            "Time (ms)",
            "Bytes",
            "Score",
            width = width
        ));
        output.push_str(&format!("  {}\n", "-".repeat(width + 42)));
        for entry in &report.efficiency {
            output.push_str(&format!(
                "  {:>4}  {:<width$}  {:>12.4}  {:>10}  {:>8.2}\n",
                entry.rank,
                entry.algorithm,
                entry.total_time_ms,
                entry.total_bandwidth_bytes,
                entry.score,
                width = width
            ));
        }
    }

    if !report.scenarios.is_empty() {
        output.push_str("\nScenarios\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for scenario in &report.scenarios {
            output.push_str(&format!(
                "  {} ({}) [{}]\n",
                scenario.kind.label(),
                scenario.algorithms(),
                scenario.family
            ));
            for phase in &scenario.phases {
                output.push_str(&format!("      {:<16} {:.4} ms\n", phase.name, phase.millis));
            }
            output.push_str(&format!(
                "      total: {:.4} ms  bandwidth: {} B",
                scenario.total_time_ms, scenario.total_bandwidth_bytes
            ));
            if let Some(overhead) = scenario.overhead_pct() {
                output.push_str(&format!("  overhead: {:.2}%", overhead));
            }
            output.push_str("\n\n");
        }
    }

    if !report.failures.is_empty() {
        output.push_str("\nFailures\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for failure in &report.failures {
            match failure.trial {
                Some(trial) => output.push_str(&format!(
                    "  ✗ {} ({}, trial {}): {}\n",
                    failure.algorithm, failure.context, trial, failure.message
                )),
                None => output.push_str(&format!(
                    "  ✗ {} ({}): {}\n",
                    failure.algorithm, failure.context, failure.message
                )),
            }
        }
    }

    if let Some(analysis) = &report.analysis {
        output.push('\n');
        output.push_str(&analysis.executive_summary);
        output.push('\n');

        let recs = &analysis.recommendations;
        output.push_str(&format!("\nRecommendations ({})\n", recs.use_case));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for rec in &recs.recommendations {
            output.push_str(&format!(
                "  {}: classic {} / post-quantum {}\n",
                rec.category, rec.classic, rec.pqc
            ));
            if let Some(hybrid) = &rec.hybrid {
                output.push_str(&format!("      hybrid: {}\n", hybrid));
            }
            if let Some(note) = &rec.note {
                output.push_str(&format!("      note: {}\n", note));
            }
        }
        if let Some(data) = &recs.data_driven {
            output.push_str(&format!(
                "  Measured: fastest {} ({:.4} ms), smallest {} ({:.0} B)\n",
                data.fastest_overall.algorithm,
                data.fastest_overall.value,
                data.smallest_overhead.algorithm,
                data.smallest_overhead.value
            ));
        }
    }

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Succeeded: {}  Failed: {}  Classic: {}  Post-Quantum: {}\n",
        report.summary.total_algorithms,
        report.summary.succeeded,
        report.summary.failed,
        report.summary.classic,
        report.summary.post_quantum
    ));
    if report.summary.scenarios + report.summary.scenario_failures > 0 {
        output.push_str(&format!(
            "  Scenarios: {}  Scenario failures: {}\n",
            report.summary.scenarios, report.summary.scenario_failures
        ));
    }
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pqbench_analysis::UseCase;
    use pqbench_core::OutlierMethod;
    use pqbench_report::{
        FailureInfo, REPORT_SCHEMA_VERSION, ReportConfig, ReportMeta, ReportSummary,
    };
    use pqbench_stats::EfficiencyWeights;

    fn empty_report() -> Report {
        Report {
            meta: ReportMeta {
                schema_version: REPORT_SCHEMA_VERSION,
                version: "0.1.0".to_string(),
                timestamp: Utc::now(),
                config: ReportConfig {
                    iterations: 10,
                    outlier_method: OutlierMethod::default(),
                    efficiency_weights: EfficiencyWeights::default(),
                    use_case: UseCase::General,
                },
            },
            results: Vec::new(),
            efficiency: Vec::new(),
            scenarios: Vec::new(),
            failures: Vec::new(),
            analysis: None,
            summary: ReportSummary::default(),
        }
    }

    #[test]
    fn test_format_empty_report() {
        let text = format_human_output(&empty_report());
        assert!(text.contains("pqbench Results"));
        assert!(text.contains("Summary"));
        assert!(!text.contains("Efficiency Ranking"));
        assert!(!text.contains("Scenarios:"));
    }

    #[test]
    fn test_format_lists_failures() {
        let mut report = empty_report();
        report.failures.push(FailureInfo {
            algorithm: "RSA-15360".to_string(),
            context: "benchmark".to_string(),
            trial: Some(0),
            message: "Unsupported parameter set: RSA-15360".to_string(),
        });
        let text = format_human_output(&report);
        assert!(text.contains("Failures"));
        assert!(text.contains("RSA-15360 (benchmark, trial 0)"));
    }
}
