//! Trial Log Replay
//!
//! The crypto provider runs out of process. An external harness records every
//! trial it executes into a JSON trial log; `ReplayBackend` hands those
//! recorded trials back to the accumulator in order, and serves the
//! single-shot measurements the scenario composer asks for.
//!
//! ```json
//! {
//!   "symmetric": { "encrypt_ms_per_mib": 0.8, "decrypt_ms_per_mib": 0.7, "tag_bytes": 16 },
//!   "algorithms": [
//!     {
//!       "name": "ML-KEM-768",
//!       "kind": "kem",
//!       "trials": [
//!         { "timings": { "KeyGen": 0.05, "Encaps": 0.06, "Decaps": 0.07 },
//!           "sizes": { "PublicKey": 1184, "SecretKey": 2400, "Output": 1088 } },
//!         { "error": "decapsulation mismatch" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use anyhow::Context;
use pqbench_core::{
    AlgorithmKind, AlgorithmSpec, Artifact, Family, FamilyMarkers, Operation, TrialError,
    TrialOutcome, TrialRunner,
};
use pqbench_scenarios::{HybridRun, KemRun, ScenarioBackend, SignatureRun};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// A recorded benchmark session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialLog {
    /// Recorded algorithms
    #[serde(default)]
    pub algorithms: Vec<RecordedAlgorithm>,
    /// AEAD throughput used for hybrid encryption
    #[serde(default)]
    pub symmetric: SymmetricCalibration,
}

/// Recorded trials of one algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAlgorithm {
    /// Algorithm identifier
    pub name: String,
    /// KEM or signature
    pub kind: AlgorithmKind,
    /// Explicit family; classified from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<Family>,
    /// Trials in execution order
    #[serde(default)]
    pub trials: Vec<RecordedTrial>,
}

/// One recorded trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordedTrial {
    /// The provider signalled a failure
    Failed {
        /// Provider message
        error: String,
    },
    /// The trial completed
    Completed {
        /// Milliseconds per operation
        timings: BTreeMap<Operation, f64>,
        /// Bytes per artifact
        #[serde(default)]
        sizes: BTreeMap<Artifact, u64>,
    },
}

impl RecordedTrial {
    fn outcome(&self) -> Result<TrialOutcome, TrialError> {
        match self {
            RecordedTrial::Failed { error } => Err(TrialError::Backend(error.clone())),
            RecordedTrial::Completed { timings, sizes } => Ok(TrialOutcome {
                timings: timings.clone(),
                sizes: sizes.clone(),
            }),
        }
    }
}

/// Symmetric cipher throughput
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetricCalibration {
    /// Encryption milliseconds per MiB of plaintext
    #[serde(default)]
    pub encrypt_ms_per_mib: f64,
    /// Decryption milliseconds per MiB of ciphertext
    #[serde(default)]
    pub decrypt_ms_per_mib: f64,
    /// Authentication tag appended to every ciphertext
    #[serde(default = "default_tag_bytes")]
    pub tag_bytes: u64,
}

impl Default for SymmetricCalibration {
    fn default() -> Self {
        Self {
            encrypt_ms_per_mib: 0.0,
            decrypt_ms_per_mib: 0.0,
            tag_bytes: default_tag_bytes(),
        }
    }
}

fn default_tag_bytes() -> u64 {
    16
}

impl TrialLog {
    /// Load a trial log from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trial log {}", path.display()))?;
        let log: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse trial log {}", path.display()))?;
        Ok(log)
    }

    /// Algorithm configurations in log order
    pub fn specs(&self, markers: &FamilyMarkers) -> Vec<AlgorithmSpec> {
        self.algorithms
            .iter()
            .map(|a| {
                let family = a.family.unwrap_or_else(|| markers.classify(&a.name));
                AlgorithmSpec::new(a.name.clone(), family, a.kind)
            })
            .collect()
    }

    /// Smallest recorded trial count among `names`
    pub fn min_trials<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<usize> {
        names
            .into_iter()
            .filter_map(|name| self.find(name))
            .map(|a| a.trials.len())
            .min()
    }

    fn find(&self, name: &str) -> Option<&RecordedAlgorithm> {
        self.algorithms.iter().find(|a| a.name == name)
    }
}

/// Replays a trial log as the crypto provider
#[derive(Debug, Clone)]
pub struct ReplayBackend {
    log: TrialLog,
    cursors: HashMap<String, usize>,
}

impl ReplayBackend {
    /// Backend positioned at the first trial of every algorithm
    pub fn new(log: TrialLog) -> Self {
        Self {
            log,
            cursors: HashMap::new(),
        }
    }

    /// The replayed log
    pub fn log(&self) -> &TrialLog {
        &self.log
    }

    fn recorded(&self, name: &str, kind: AlgorithmKind) -> Result<&RecordedAlgorithm, TrialError> {
        let algorithm = self
            .log
            .find(name)
            .ok_or_else(|| TrialError::Unsupported(name.to_string()))?;
        if algorithm.kind != kind {
            return Err(TrialError::Unsupported(format!(
                "{} is not a {} algorithm",
                name, kind
            )));
        }
        Ok(algorithm)
    }

    // Scenario phases are single-shot: the first trial that completed
    fn single_shot(&self, name: &str, kind: AlgorithmKind) -> Result<TrialOutcome, TrialError> {
        let algorithm = self.recorded(name, kind)?;
        let outcome = algorithm
            .trials
            .iter()
            .find_map(|t| t.outcome().ok())
            .ok_or_else(|| TrialError::Exhausted(name.to_string()))?;
        outcome.validate(kind)?;
        Ok(outcome)
    }
}

impl TrialRunner for ReplayBackend {
    fn run_trial(&mut self, spec: &AlgorithmSpec) -> Result<TrialOutcome, TrialError> {
        let cursor = self.cursors.get(&spec.name).copied().unwrap_or(0);
        let trial = self
            .recorded(&spec.name, spec.kind)?
            .trials
            .get(cursor)
            .ok_or_else(|| TrialError::Exhausted(spec.name.clone()))?;
        let outcome = trial.outcome();
        self.cursors.insert(spec.name.clone(), cursor + 1);
        outcome
    }
}

fn timing(outcome: &TrialOutcome, op: Operation) -> f64 {
    outcome.timings.get(&op).copied().unwrap_or(0.0)
}

fn size(outcome: &TrialOutcome, artifact: Artifact) -> u64 {
    outcome.sizes.get(&artifact).copied().unwrap_or(0)
}

impl ScenarioBackend for ReplayBackend {
    fn sign(&mut self, algorithm: &str, message: &[u8]) -> Result<SignatureRun, TrialError> {
        let outcome = self.single_shot(algorithm, AlgorithmKind::Signature)?;
        debug!(algorithm, message_bytes = message.len(), "replaying signature");
        Ok(SignatureRun {
            algorithm: algorithm.to_string(),
            keygen_ms: timing(&outcome, Operation::KeyGen),
            sign_ms: timing(&outcome, Operation::Sign),
            verify_ms: timing(&outcome, Operation::Verify),
            public_key_bytes: size(&outcome, Artifact::PublicKey),
            signature_bytes: size(&outcome, Artifact::Output),
        })
    }

    fn kem(&mut self, algorithm: &str) -> Result<KemRun, TrialError> {
        let outcome = self.single_shot(algorithm, AlgorithmKind::Kem)?;
        Ok(KemRun {
            algorithm: algorithm.to_string(),
            keygen_ms: timing(&outcome, Operation::KeyGen),
            encaps_ms: timing(&outcome, Operation::Encaps),
            decaps_ms: timing(&outcome, Operation::Decaps),
            public_key_bytes: size(&outcome, Artifact::PublicKey),
            ciphertext_bytes: size(&outcome, Artifact::Output),
        })
    }

    fn hybrid_encrypt(
        &mut self,
        algorithm: &str,
        plaintext: &[u8],
    ) -> Result<HybridRun, TrialError> {
        let kem = self.kem(algorithm)?;
        let symmetric = self.log.symmetric;
        let mib = plaintext.len() as f64 / BYTES_PER_MIB;
        Ok(HybridRun {
            kem,
            aead_encrypt_ms: symmetric.encrypt_ms_per_mib * mib,
            aead_decrypt_ms: symmetric.decrypt_ms_per_mib * mib,
            plaintext_bytes: plaintext.len() as u64,
            ciphertext_bytes: plaintext.len() as u64 + symmetric.tag_bytes,
        })
    }
}
