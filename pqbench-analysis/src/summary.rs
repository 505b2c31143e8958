//! Executive Summary

use crate::family::{FamilyAnalysis, FamilyComparison};
use crate::outcome::AnalysisOutcome;

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed-layout plain-text summary of a batch and its analyses
pub fn executive_summary(
    total_algorithms: usize,
    classic: &AnalysisOutcome<FamilyAnalysis>,
    pqc: &AnalysisOutcome<FamilyAnalysis>,
    comparison: &AnalysisOutcome<FamilyComparison>,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    let rule = "=".repeat(80);
    let thin = "-".repeat(80);

    lines.push(rule.clone());
    lines.push("EXECUTIVE SUMMARY: CRYPTOGRAPHIC ALGORITHM BENCHMARK".to_string());
    lines.push(rule.clone());
    lines.push(String::new());

    lines.push(format!("Total Algorithms Tested: {}", total_algorithms));
    lines.push(format!(
        "- Classical: {}",
        classic.ready().map_or(0, FamilyAnalysis::count)
    ));
    lines.push(format!(
        "- Post-Quantum: {}",
        pqc.ready().map_or(0, FamilyAnalysis::count)
    ));
    lines.push(String::new());

    lines.push("KEY FINDINGS:".to_string());
    lines.push(thin.clone());

    // Findings are numbered by the sections actually emitted
    let mut item = 0;
    let mut heading = |title: String| {
        item += 1;
        format!("{}. {}", item, title)
    };

    if let Some(cmp) = comparison.ready() {
        let perf = &cmp.performance;
        lines.push(heading(format!("Performance: {}", perf.verdict)));
        lines.push(format!("   - Classic average: {:.2} ms", perf.classic_avg_ms));
        lines.push(format!("   - PQC average: {:.2} ms", perf.pqc_avg_ms));
        lines.push(String::new());

        let bw = &cmp.bandwidth;
        lines.push(heading(format!("Bandwidth: {}", bw.verdict)));
        lines.push(format!(
            "   - Classic average: {} bytes",
            thousands(bw.classic_avg_bytes)
        ));
        lines.push(format!("   - PQC average: {} bytes", thousands(bw.pqc_avg_bytes)));
        lines.push(format!(
            "   - PQC overhead: {:.1}%",
            (bw.size_ratio - 1.0) * 100.0
        ));
        lines.push(String::new());
    } else if let Some(reason) = comparison.reason() {
        lines.push(format!("Comparison unavailable: {}", reason));
        lines.push(String::new());
    }

    lines.push(heading("Best Performers:".to_string()));
    if let Some(a) = classic.ready() {
        lines.push(format!(
            "   - Fastest Classic: {} ({:.2} ms)",
            a.fastest.algorithm, a.fastest.time_ms
        ));
    }
    if let Some(a) = pqc.ready() {
        lines.push(format!(
            "   - Fastest PQC: {} ({:.2} ms)",
            a.fastest.algorithm, a.fastest.time_ms
        ));
    }
    lines.push(String::new());

    lines.push("RECOMMENDATIONS:".to_string());
    lines.push(thin);
    lines.push("* Short-term (2024-2025): Begin hybrid deployments (Classic + PQC)".to_string());
    lines.push(
        "* Medium-term (2025-2027): Increase PQC adoption, especially for new systems".to_string(),
    );
    lines.push("* Long-term (2027+): Full PQC deployment for quantum resistance".to_string());
    lines.push(String::new());
    lines.push("* Recommended PQC algorithms:".to_string());
    lines.push("  - KEM: ML-KEM-768 (Kyber) - NIST standardized".to_string());
    lines.push("  - Signatures: ML-DSA-65 (Dilithium3) - NIST standardized".to_string());
    lines.push(
        "  - Stateless signatures: SLH-DSA (SPHINCS+) - For specific use cases".to_string(),
    );
    lines.push(String::new());
    lines.push(rule);

    lines.join("\n")
}
