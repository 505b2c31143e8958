//! Flat Row Projections
//!
//! Every field is a string, float or integer. Derived values that do not
//! apply to a row are `None` and serialise as empty cells.

use pqbench_analysis::EfficiencyEntry;
use pqbench_core::{AlgorithmResult, Operation};
use pqbench_scenarios::{ScenarioDetails, ScenarioResult};
use serde::{Deserialize, Serialize};

/// One algorithm result as a flat record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRow {
    /// Algorithm identifier
    #[serde(rename = "Algorithm")]
    pub algorithm: String,
    /// Classic or Post-Quantum
    #[serde(rename = "Family")]
    pub family: String,
    /// KEM or signature
    #[serde(rename = "Type")]
    pub kind: String,
    /// Completed trials
    #[serde(rename = "Iterations")]
    pub iterations: usize,
    /// Mean key generation time
    #[serde(rename = "KeyGen (ms)")]
    pub keygen_ms: Option<f64>,
    /// Mean encapsulation time
    #[serde(rename = "Encaps (ms)")]
    pub encaps_ms: Option<f64>,
    /// Mean decapsulation time
    #[serde(rename = "Decaps (ms)")]
    pub decaps_ms: Option<f64>,
    /// Mean signing time
    #[serde(rename = "Sign (ms)")]
    pub sign_ms: Option<f64>,
    /// Mean verification time
    #[serde(rename = "Verify (ms)")]
    pub verify_ms: Option<f64>,
    /// Sum of per-operation means
    #[serde(rename = "Total Time (ms)")]
    pub total_time_ms: f64,
    /// Public key bytes
    #[serde(rename = "PK Size (B)")]
    pub public_key_bytes: u64,
    /// Secret key bytes
    #[serde(rename = "SK Size (B)")]
    pub secret_key_bytes: u64,
    /// Ciphertext or signature bytes
    #[serde(rename = "CT/Sig Size (B)")]
    pub output_bytes: u64,
    /// Public key plus output
    #[serde(rename = "Total Bandwidth (B)")]
    pub total_bandwidth_bytes: u64,
    /// Repeatability score
    #[serde(rename = "Consistency Score")]
    pub consistency_score: f64,
    /// Outliers flagged across operations
    #[serde(rename = "Outliers")]
    pub outliers: usize,
    /// Batch-relative efficiency score
    #[serde(rename = "Efficiency Score")]
    pub efficiency_score: Option<f64>,
    /// Batch-relative efficiency rank
    #[serde(rename = "Efficiency Rank")]
    pub efficiency_rank: Option<usize>,
}

impl AlgorithmRow {
    /// Project a result, joined with its efficiency entry if ranked
    pub fn new(result: &AlgorithmResult, efficiency: Option<&EfficiencyEntry>) -> Self {
        Self {
            algorithm: result.algorithm.clone(),
            family: result.family.to_string(),
            kind: result.kind.to_string(),
            iterations: result.iterations,
            keygen_ms: result.mean_ms(Operation::KeyGen),
            encaps_ms: result.mean_ms(Operation::Encaps),
            decaps_ms: result.mean_ms(Operation::Decaps),
            sign_ms: result.mean_ms(Operation::Sign),
            verify_ms: result.mean_ms(Operation::Verify),
            total_time_ms: result.total_time_ms(),
            public_key_bytes: result.sizes.public_key,
            secret_key_bytes: result.sizes.secret_key,
            output_bytes: result.sizes.output,
            total_bandwidth_bytes: result.total_bandwidth_bytes(),
            consistency_score: result.consistency_score,
            outliers: result.outlier_count(),
            efficiency_score: efficiency.map(|e| e.score),
            efficiency_rank: efficiency.map(|e| e.rank),
        }
    }
}

/// One scenario result as a flat record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Flow name
    #[serde(rename = "Scenario")]
    pub scenario: String,
    /// KEM, if any
    #[serde(rename = "KEM Algorithm")]
    pub kem_algorithm: Option<String>,
    /// Signature scheme
    #[serde(rename = "Signature Algorithm")]
    pub signature_algorithm: Option<String>,
    /// Classic or Post-Quantum
    #[serde(rename = "Family")]
    pub family: String,
    /// Sum of phases
    #[serde(rename = "Total Time (ms)")]
    pub total_time_ms: f64,
    /// Bytes exchanged
    #[serde(rename = "Total Bandwidth (B)")]
    pub total_bandwidth_bytes: u64,
    /// Size overhead, for email and code signing
    #[serde(rename = "Overhead (%)")]
    pub overhead_pct: Option<f64>,
    /// Handshake round trips, for TLS
    #[serde(rename = "Handshake RTT")]
    pub round_trips: Option<f64>,
    /// Re-keyings, for VPN
    #[serde(rename = "Re-key Count")]
    pub rekey_count: Option<u64>,
    /// Per-packet time, for VPN
    #[serde(rename = "Avg Time per Packet (ms)")]
    pub avg_per_packet_ms: Option<f64>,
    /// Phase timings as `name=ms` pairs
    #[serde(rename = "Phases")]
    pub phases: String,
}

impl From<&ScenarioResult> for ScenarioRow {
    fn from(result: &ScenarioResult) -> Self {
        let (round_trips, rekey_count, avg_per_packet_ms) = match result.details {
            ScenarioDetails::Tls { round_trips, .. } => (Some(round_trips), None, None),
            ScenarioDetails::Vpn {
                rekey_count,
                avg_per_packet_ms,
                ..
            } => (None, Some(rekey_count), Some(avg_per_packet_ms)),
            _ => (None, None, None),
        };
        let phases = result
            .phases
            .iter()
            .map(|p| format!("{}={:.3}", p.name, p.millis))
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            scenario: result.kind.label().to_string(),
            kem_algorithm: result.kem_algorithm.clone(),
            signature_algorithm: result.signature_algorithm.clone(),
            family: result.family.to_string(),
            total_time_ms: result.total_time_ms,
            total_bandwidth_bytes: result.total_bandwidth_bytes,
            overhead_pct: result.overhead_pct(),
            round_trips,
            rekey_count,
            avg_per_packet_ms,
            phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqbench_core::FamilyMarkers;
    use pqbench_scenarios::{SignatureRun, code_signing};

    #[test]
    fn test_code_signing_row() {
        let signature = SignatureRun {
            algorithm: "Falcon-512".to_string(),
            keygen_ms: 5.0,
            sign_ms: 0.25,
            verify_ms: 0.05,
            public_key_bytes: 897,
            signature_bytes: 666,
        };
        let result = code_signing(&signature, 1_048_576, &FamilyMarkers::default());
        let row = ScenarioRow::from(&result);

        assert_eq!(row.scenario, "Code Signing");
        assert_eq!(row.family, "Post-Quantum");
        assert!(row.kem_algorithm.is_none());
        assert!(row.round_trips.is_none());
        assert!(row.overhead_pct.is_some());
        assert!(row.phases.starts_with("KeyGen=5.000; Sign=0.250"));
    }
}
