//! Algorithm Family Classification
//!
//! Classification is a substring membership test against an explicit marker
//! list owned by the caller. There is no global registry.

use serde::{Deserialize, Serialize};

/// Name substrings that identify post-quantum schemes
pub const DEFAULT_PQC_MARKERS: &[&str] = &[
    "Kyber",
    "ML-KEM",
    "BIKE",
    "HQC",
    "Frodo",
    "McEliece",
    "Dilithium",
    "ML-DSA",
    "Falcon",
    "SPHINCS",
    "SLH-DSA",
];

/// Algorithm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Family {
    /// RSA, elliptic curves and other pre-quantum schemes
    Classic,
    /// Schemes believed resistant to quantum attacks
    #[serde(rename = "Post-Quantum")]
    PostQuantum,
}

impl Family {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Family::Classic => "Classic",
            Family::PostQuantum => "Post-Quantum",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable classifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMarkers {
    pqc: Vec<String>,
}

impl Default for FamilyMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_PQC_MARKERS.iter().copied())
    }
}

impl FamilyMarkers {
    /// Build a classifier from post-quantum name markers
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pqc: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Markers in use
    pub fn markers(&self) -> &[String] {
        &self.pqc
    }

    /// Post-Quantum if the name contains any marker, else Classic
    pub fn classify(&self, algorithm: &str) -> Family {
        if self.pqc.iter().any(|m| algorithm.contains(m.as_str())) {
            Family::PostQuantum
        } else {
            Family::Classic
        }
    }

    /// Post-Quantum if any constituent algorithm is post-quantum
    pub fn classify_all<'a>(&self, algorithms: impl IntoIterator<Item = &'a str>) -> Family {
        if algorithms
            .into_iter()
            .any(|a| self.classify(a) == Family::PostQuantum)
        {
            Family::PostQuantum
        } else {
            Family::Classic
        }
    }
}
