//! Use-Case Recommendations
//!
//! Fixed templates per use case, overlaid with the fastest and smallest rows
//! of the actual batch. Only `generated_at` varies between calls.

use crate::ranking::{Performer, best_performers};
use chrono::{DateTime, Utc};
use pqbench_core::AlgorithmResult;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Deployment profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    /// General purpose
    #[default]
    General,
    /// Constrained devices
    Iot,
    /// High-throughput servers
    Server,
    /// Mobile applications
    Mobile,
    /// Long-term high security
    HighSecurity,
}

impl UseCase {
    /// Every use case
    pub const ALL: [UseCase; 5] = [
        UseCase::General,
        UseCase::Iot,
        UseCase::Server,
        UseCase::Mobile,
        UseCase::HighSecurity,
    ];

    /// Identifier used in configuration and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            UseCase::General => "general",
            UseCase::Iot => "iot",
            UseCase::Server => "server",
            UseCase::Mobile => "mobile",
            UseCase::HighSecurity => "high_security",
        }
    }
}

impl std::fmt::Display for UseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        UseCase::ALL
            .into_iter()
            .find(|u| u.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown use case: {} (expected general, iot, server, mobile or high_security)",
                    s
                )
            })
    }
}

/// One templated recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Area covered
    pub category: String,
    /// Classic choice
    pub classic: String,
    /// Post-quantum choice
    pub pqc: String,
    /// Hybrid deployment advice
    pub hybrid: Option<String>,
    /// Additional context
    pub note: Option<String>,
}

impl Recommendation {
    fn new(category: &str, classic: &str, pqc: &str) -> Self {
        Self {
            category: category.to_string(),
            classic: classic.to_string(),
            pqc: pqc.to_string(),
            hybrid: None,
            note: None,
        }
    }

    fn hybrid(mut self, text: &str) -> Self {
        self.hybrid = Some(text.to_string());
        self
    }

    fn note(mut self, text: &str) -> Self {
        self.note = Some(text.to_string());
        self
    }
}

fn templates(use_case: UseCase) -> Vec<Recommendation> {
    match use_case {
        UseCase::General => vec![
            Recommendation::new(
                "Key Exchange (KEM)",
                "RSA-2048 or ECDH P-256",
                "ML-KEM-768 (Kyber768) - NIST standardized, good balance",
            )
            .hybrid("Recommended: Use both classic and PQC in hybrid mode for transition"),
            Recommendation::new(
                "Digital Signatures",
                "ECDSA P-256 or RSA-2048",
                "ML-DSA-65 (Dilithium3) - NIST standardized",
            )
            .hybrid("Consider hybrid signatures for critical applications"),
        ],
        UseCase::Iot => vec![
            Recommendation::new(
                "Constrained Devices",
                "ECDSA P-256 (smallest keys)",
                "Kyber512 or Dilithium2 (smallest PQC variants)",
            )
            .note("Consider hybrid with preference for classic when bandwidth is critical"),
        ],
        UseCase::Server => vec![
            Recommendation::new(
                "High-Throughput Server",
                "ECDSA P-256 with hardware acceleration",
                "ML-KEM-1024 and ML-DSA-87 for maximum security",
            )
            .note("Servers can handle larger key sizes and benefit from future-proofing"),
        ],
        UseCase::Mobile => vec![
            Recommendation::new(
                "Mobile Applications",
                "ECDSA P-256",
                "Kyber768 and Dilithium3 (balanced)",
            )
            .note("Balance between security and battery/bandwidth consumption"),
        ],
        UseCase::HighSecurity => vec![
            Recommendation::new(
                "High Security / Long-Term",
                "Not recommended (quantum vulnerability)",
                "ML-KEM-1024 + ML-DSA-87 or SPHINCS+-256f",
            )
            .note("Use highest security PQC variants. Consider SPHINCS+ for stateless signatures."),
        ],
    }
}

/// Picks from the measured batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDriven {
    /// Lowest total time
    pub fastest_overall: Performer,
    /// Lowest total bandwidth
    pub smallest_overhead: Performer,
}

/// Phased migration plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStrategy {
    /// Phase 1
    pub phase_1: String,
    /// Phase 2
    pub phase_2: String,
    /// Phase 3
    pub phase_3: String,
    /// Phase 4
    pub phase_4: String,
    /// Overall timeline
    pub timeline: String,
}

impl Default for MigrationStrategy {
    fn default() -> Self {
        Self {
            phase_1: "Assess current crypto usage and quantum risk timeline".to_string(),
            phase_2: "Implement hybrid mode (Classic + PQC) for critical systems".to_string(),
            phase_3: "Gradually increase PQC usage as implementations mature".to_string(),
            phase_4: "Full PQC deployment for new systems, maintain hybrid for legacy".to_string(),
            timeline: "2024-2030 (NIST recommendation)".to_string(),
        }
    }
}

/// Recommendations for one use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Use case addressed
    pub use_case: UseCase,
    /// Generation time
    pub generated_at: DateTime<Utc>,
    /// Templated advice
    pub recommendations: Vec<Recommendation>,
    /// Picks from the batch, absent for an empty batch
    pub data_driven: Option<DataDriven>,
    /// Migration plan
    pub migration_strategy: MigrationStrategy,
}

/// Build recommendations for a use case from a finalised batch
pub fn generate_recommendations(batch: &[AlgorithmResult], use_case: UseCase) -> Recommendations {
    let data_driven = best_performers(batch).map(|best| DataDriven {
        fastest_overall: best.fastest,
        smallest_overhead: best.smallest,
    });

    Recommendations {
        use_case,
        generated_at: Utc::now(),
        recommendations: templates(use_case),
        data_driven,
        migration_strategy: MigrationStrategy::default(),
    }
}
