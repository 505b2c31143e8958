//! Single-shot scenario inputs

use pqbench_core::{AlgorithmKind, AlgorithmResult, Operation};
use serde::{Deserialize, Serialize};

/// One signature key generation, sign and verify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRun {
    /// Signature algorithm
    pub algorithm: String,
    /// Key pair generation
    pub keygen_ms: f64,
    /// Signing
    pub sign_ms: f64,
    /// Verification
    pub verify_ms: f64,
    /// Public key bytes
    pub public_key_bytes: u64,
    /// Signature bytes
    pub signature_bytes: u64,
}

impl SignatureRun {
    /// Use the per-operation means of a signature result row
    ///
    /// Returns `None` when the row is not a signature scheme.
    pub fn from_result(result: &AlgorithmResult) -> Option<Self> {
        if result.kind != AlgorithmKind::Signature {
            return None;
        }
        let mean = |op| result.mean_ms(op).unwrap_or(0.0);
        Some(Self {
            algorithm: result.algorithm.clone(),
            keygen_ms: mean(Operation::KeyGen),
            sign_ms: mean(Operation::Sign),
            verify_ms: mean(Operation::Verify),
            public_key_bytes: result.sizes.public_key,
            signature_bytes: result.sizes.output,
        })
    }

    /// Key generation plus sign plus verify
    pub fn total_ms(&self) -> f64 {
        self.keygen_ms + self.sign_ms + self.verify_ms
    }
}

/// One KEM key generation, encapsulation and decapsulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KemRun {
    /// KEM algorithm
    pub algorithm: String,
    /// Key pair generation
    pub keygen_ms: f64,
    /// Encapsulation
    pub encaps_ms: f64,
    /// Decapsulation
    pub decaps_ms: f64,
    /// Public key bytes
    pub public_key_bytes: u64,
    /// Ciphertext bytes
    pub ciphertext_bytes: u64,
}

impl KemRun {
    /// Use the per-operation means of a KEM result row
    ///
    /// Returns `None` when the row is not a KEM.
    pub fn from_result(result: &AlgorithmResult) -> Option<Self> {
        if result.kind != AlgorithmKind::Kem {
            return None;
        }
        let mean = |op| result.mean_ms(op).unwrap_or(0.0);
        Some(Self {
            algorithm: result.algorithm.clone(),
            keygen_ms: mean(Operation::KeyGen),
            encaps_ms: mean(Operation::Encaps),
            decaps_ms: mean(Operation::Decaps),
            public_key_bytes: result.sizes.public_key,
            ciphertext_bytes: result.sizes.output,
        })
    }

    /// Cost of one re-keying: encapsulation plus decapsulation
    pub fn exchange_ms(&self) -> f64 {
        self.encaps_ms + self.decaps_ms
    }

    /// Key generation plus one exchange
    pub fn total_ms(&self) -> f64 {
        self.keygen_ms + self.exchange_ms()
    }
}

/// KEM key exchange followed by AEAD encryption of a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridRun {
    /// Key exchange phase
    pub kem: KemRun,
    /// AEAD encryption of the payload
    pub aead_encrypt_ms: f64,
    /// AEAD decryption of the payload
    pub aead_decrypt_ms: f64,
    /// Plaintext bytes
    pub plaintext_bytes: u64,
    /// AEAD ciphertext bytes, tag included
    pub ciphertext_bytes: u64,
}

impl HybridRun {
    /// Encapsulation plus AEAD encryption
    pub fn total_encrypt_ms(&self) -> f64 {
        self.kem.encaps_ms + self.aead_encrypt_ms
    }

    /// Decapsulation plus AEAD decryption
    pub fn total_decrypt_ms(&self) -> f64 {
        self.kem.decaps_ms + self.aead_decrypt_ms
    }
}
