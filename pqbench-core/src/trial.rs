//! Trial Interface
//!
//! The crypto provider is an opaque capability: one call runs one trial of
//! one algorithm and reports elapsed milliseconds per operation plus byte
//! lengths per artifact, or a failure signal.

use crate::error::TrialError;
use crate::family::Family;
use crate::measurement::{Artifact, Measurement, Operation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of primitive under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Key encapsulation mechanism
    Kem,
    /// Digital signature scheme
    Signature,
}

impl AlgorithmKind {
    /// The three timed operations of this kind, in execution order
    pub fn operations(self) -> [Operation; 3] {
        match self {
            AlgorithmKind::Kem => [Operation::KeyGen, Operation::Encaps, Operation::Decaps],
            AlgorithmKind::Signature => [Operation::KeyGen, Operation::Sign, Operation::Verify],
        }
    }

    /// Artifacts every trial must report
    pub fn artifacts(self) -> [Artifact; 3] {
        [Artifact::PublicKey, Artifact::SecretKey, Artifact::Output]
    }

    /// Label for the `Output` artifact of this kind
    pub fn output_label(self) -> &'static str {
        match self {
            AlgorithmKind::Kem => "ciphertext",
            AlgorithmKind::Signature => "signature",
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmKind::Kem => write!(f, "KEM"),
            AlgorithmKind::Signature => write!(f, "signature"),
        }
    }
}

/// Identity of one algorithm configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmSpec {
    /// Algorithm identifier, e.g. "ML-KEM-768" or "RSA-2048"
    pub name: String,
    /// Classic or post-quantum
    pub family: Family,
    /// KEM or signature
    pub kind: AlgorithmKind,
}

impl AlgorithmSpec {
    /// Create a spec
    pub fn new(name: impl Into<String>, family: Family, kind: AlgorithmKind) -> Self {
        Self {
            name: name.into(),
            family,
            kind,
        }
    }
}

/// What one successful trial reported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Elapsed milliseconds per operation
    pub timings: BTreeMap<Operation, f64>,
    /// Byte length per artifact
    pub sizes: BTreeMap<Artifact, u64>,
}

impl TrialOutcome {
    /// Builder: add a timing
    pub fn with_time(mut self, operation: Operation, millis: f64) -> Self {
        self.timings.insert(operation, millis);
        self
    }

    /// Builder: add a size
    pub fn with_size(mut self, artifact: Artifact, bytes: u64) -> Self {
        self.sizes.insert(artifact, bytes);
        self
    }

    /// Flatten into individual measurements, timings first
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        let times = self
            .timings
            .iter()
            .map(|(&operation, &millis)| Measurement::Time { operation, millis });
        let sizes = self
            .sizes
            .iter()
            .map(|(&artifact, &bytes)| Measurement::Size { artifact, bytes });
        times.chain(sizes)
    }

    /// Check that every operation and artifact required by `kind` is present
    pub fn validate(&self, kind: AlgorithmKind) -> Result<(), TrialError> {
        if let Some(op) = kind
            .operations()
            .into_iter()
            .find(|op| !self.timings.contains_key(op))
        {
            return Err(TrialError::MissingOperation(op.to_string()));
        }
        if let Some(artifact) = kind
            .artifacts()
            .into_iter()
            .find(|a| !self.sizes.contains_key(a))
        {
            return Err(TrialError::MissingArtifact(artifact.to_string()));
        }
        Ok(())
    }
}

/// Capability interface around the crypto provider
pub trait TrialRunner {
    /// Run one trial of `spec`
    fn run_trial(&mut self, spec: &AlgorithmSpec) -> Result<TrialOutcome, TrialError>;
}

impl<F> TrialRunner for F
where
    F: FnMut(&AlgorithmSpec) -> Result<TrialOutcome, TrialError>,
{
    fn run_trial(&mut self, spec: &AlgorithmSpec) -> Result<TrialOutcome, TrialError> {
        self(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kem_outcome() -> TrialOutcome {
        TrialOutcome::default()
            .with_time(Operation::KeyGen, 0.1)
            .with_time(Operation::Encaps, 0.2)
            .with_time(Operation::Decaps, 0.3)
            .with_size(Artifact::PublicKey, 1184)
            .with_size(Artifact::SecretKey, 2400)
            .with_size(Artifact::Output, 1088)
    }

    #[test]
    fn test_validate_complete_outcome() {
        assert!(kem_outcome().validate(AlgorithmKind::Kem).is_ok());
    }

    #[test]
    fn test_validate_wrong_kind() {
        let err = kem_outcome().validate(AlgorithmKind::Signature).unwrap_err();
        assert_eq!(err, TrialError::MissingOperation("Sign".to_string()));
    }

    #[test]
    fn test_validate_missing_artifact() {
        let mut outcome = kem_outcome();
        outcome.sizes.remove(&Artifact::SecretKey);
        let err = outcome.validate(AlgorithmKind::Kem).unwrap_err();
        assert_eq!(err, TrialError::MissingArtifact("SecretKey".to_string()));
    }

    #[test]
    fn test_measurements_flatten() {
        let outcome = kem_outcome();
        let all: Vec<_> = outcome.measurements().collect();
        assert_eq!(all.len(), 6);
        assert!(matches!(
            all[0],
            Measurement::Time {
                operation: Operation::KeyGen,
                ..
            }
        ));
    }

    #[test]
    fn test_closure_runner() {
        let spec = AlgorithmSpec::new("ML-KEM-768", Family::PostQuantum, AlgorithmKind::Kem);
        let mut calls = 0;
        let mut runner = |_: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            calls += 1;
            Ok(kem_outcome())
        };
        assert!(runner.run_trial(&spec).is_ok());
        assert!(runner.run_trial(&spec).is_ok());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AlgorithmKind::Kem.to_string(), "KEM");
        assert_eq!(AlgorithmKind::Signature.to_string(), "signature");
    }
}
