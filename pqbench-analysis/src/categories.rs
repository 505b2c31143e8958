//! Scheme Categories
//!
//! Name-substring groupings used for per-family breakdowns. The table is
//! plain configuration handed to the analyzer.

use serde::{Deserialize, Serialize};

/// What a category groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryRole {
    /// Pre-quantum schemes
    Classic,
    /// Post-quantum key encapsulation
    Kem,
    /// Post-quantum signatures
    Signature,
}

/// A named group of schemes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name
    pub label: String,
    /// Name substrings that place an algorithm in this group
    pub markers: Vec<String>,
    /// What the group covers
    pub role: CategoryRole,
    /// Fixed guidance appended to the observation
    pub note: Option<String>,
    /// Fixed recommendation
    pub recommendation: Option<String>,
}

impl Category {
    fn new(label: &str, markers: &[&str], role: CategoryRole) -> Self {
        Self {
            label: label.to_string(),
            markers: markers.iter().map(|m| m.to_string()).collect(),
            role,
            note: None,
            recommendation: None,
        }
    }

    fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    fn with_recommendation(mut self, recommendation: &str) -> Self {
        self.recommendation = Some(recommendation.to_string());
        self
    }

    /// Whether an algorithm name falls in this group
    pub fn matches(&self, algorithm: &str) -> bool {
        self.markers.iter().any(|m| algorithm.contains(m.as_str()))
    }

    /// Label with the role suffix used in breakdowns
    pub fn display_name(&self) -> String {
        match self.role {
            CategoryRole::Classic => self.label.clone(),
            CategoryRole::Kem => format!("{} (KEM)", self.label),
            CategoryRole::Signature => format!("{} (Signature)", self.label),
        }
    }
}

/// Category groupings for every family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    /// Ordered categories
    pub categories: Vec<Category>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("RSA", &["RSA"], CategoryRole::Classic)
                    .with_note(
                        "Larger key sizes provide higher security but increase computation time significantly.",
                    )
                    .with_recommendation(
                        "RSA-2048 offers good balance for most applications. RSA-3072+ recommended for long-term security (beyond 2030).",
                    ),
                Category::new("ECC/ECDSA", &["SECP", "ECC", "ECDSA"], CategoryRole::Classic)
                    .with_note("ECC provides equivalent security to RSA with much smaller keys.")
                    .with_recommendation(
                        "P-256 (SECP256R1) is widely supported and efficient. P-384 recommended for high-security applications.",
                    ),
                Category::new("ML-KEM/Kyber", &["ML-KEM", "Kyber"], CategoryRole::Kem),
                Category::new("BIKE", &["BIKE"], CategoryRole::Kem),
                Category::new("HQC", &["HQC"], CategoryRole::Kem),
                Category::new("FrodoKEM", &["Frodo"], CategoryRole::Kem),
                Category::new("Classic McEliece", &["McEliece"], CategoryRole::Kem),
                Category::new(
                    "ML-DSA/Dilithium",
                    &["ML-DSA", "Dilithium"],
                    CategoryRole::Signature,
                ),
                Category::new("Falcon", &["Falcon"], CategoryRole::Signature),
                Category::new(
                    "SLH-DSA/SPHINCS+",
                    &["SLH-DSA", "SPHINCS"],
                    CategoryRole::Signature,
                ),
            ],
        }
    }
}

impl CategoryTable {
    /// Categories of one role, in table order
    pub fn by_role(&self, role: CategoryRole) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.role == role)
    }
}
