//! Measurements and Sample Sets

use pqbench_stats::{StatisticalSummary, compute_summary};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timed operation of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Key pair generation
    KeyGen,
    /// KEM encapsulation
    Encaps,
    /// KEM decapsulation
    Decaps,
    /// Signature generation
    Sign,
    /// Signature verification
    Verify,
}

impl Operation {
    /// Display label, also used as a column prefix
    pub fn label(self) -> &'static str {
        match self {
            Operation::KeyGen => "KeyGen",
            Operation::Encaps => "Encaps",
            Operation::Decaps => "Decaps",
            Operation::Sign => "Sign",
            Operation::Verify => "Verify",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sized artifact produced by a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Artifact {
    /// Encoded public key
    PublicKey,
    /// Encoded secret key
    SecretKey,
    /// KEM ciphertext or signature
    Output,
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Artifact::PublicKey => write!(f, "PublicKey"),
            Artifact::SecretKey => write!(f, "SecretKey"),
            Artifact::Output => write!(f, "Output"),
        }
    }
}

/// A single recorded value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Measurement {
    /// Elapsed time of one operation in milliseconds
    Time {
        /// Operation timed
        operation: Operation,
        /// Elapsed milliseconds
        millis: f64,
    },
    /// Byte length of one artifact
    Size {
        /// Artifact measured
        artifact: Artifact,
        /// Length in bytes
        bytes: u64,
    },
}

/// Rejected attempt to record into a sample set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleSetError {
    /// Timing of another operation
    #[error("Sample set for {expected} cannot hold a {actual} timing")]
    WrongOperation {
        /// Operation of the sample set
        expected: Operation,
        /// Operation of the rejected measurement
        actual: Operation,
    },

    /// Size measurement offered to a timing set
    #[error("Sample set for {0} holds timings, not sizes")]
    WrongUnit(Operation),
}

/// Repeated timings of one operation for one algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    operation: Operation,
    values: Vec<f64>,
}

impl SampleSet {
    /// Create an empty sample set for an operation
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            values: Vec::new(),
        }
    }

    /// Create an empty sample set with room for `capacity` trials
    pub fn with_capacity(operation: Operation, capacity: usize) -> Self {
        Self {
            operation,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append one measurement
    pub fn record(&mut self, measurement: Measurement) -> Result<(), SampleSetError> {
        match measurement {
            Measurement::Time { operation, millis } if operation == self.operation => {
                self.values.push(millis);
                Ok(())
            }
            Measurement::Time { operation, .. } => Err(SampleSetError::WrongOperation {
                expected: self.operation,
                actual: operation,
            }),
            Measurement::Size { .. } => Err(SampleSetError::WrongUnit(self.operation)),
        }
    }

    /// Operation these samples belong to
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Recorded milliseconds, in trial order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of recorded trials
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reduce to a summary (all-zero when empty)
    pub fn summarize(&self) -> StatisticalSummary {
        compute_summary(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_summarize() {
        let mut set = SampleSet::new(Operation::Encaps);
        for millis in [1.0, 2.0, 3.0] {
            set.record(Measurement::Time {
                operation: Operation::Encaps,
                millis,
            })
            .unwrap();
        }

        assert_eq!(set.len(), 3);
        assert_eq!(set.values(), &[1.0, 2.0, 3.0]);
        assert!((set.summarize().mean - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_other_operation() {
        let mut set = SampleSet::new(Operation::Sign);
        let err = set
            .record(Measurement::Time {
                operation: Operation::Verify,
                millis: 1.0,
            })
            .unwrap_err();

        assert_eq!(
            err,
            SampleSetError::WrongOperation {
                expected: Operation::Sign,
                actual: Operation::Verify
            }
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_rejects_sizes() {
        let mut set = SampleSet::new(Operation::KeyGen);
        let err = set
            .record(Measurement::Size {
                artifact: Artifact::PublicKey,
                bytes: 32,
            })
            .unwrap_err();
        assert_eq!(err, SampleSetError::WrongUnit(Operation::KeyGen));
    }

    #[test]
    fn test_empty_summary() {
        let set = SampleSet::new(Operation::Decaps);
        assert_eq!(set.summarize(), StatisticalSummary::default());
    }
}
