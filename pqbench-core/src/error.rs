//! Error Taxonomy
//!
//! Hard errors only. Soft conditions (empty data, zero denominators) resolve
//! to documented fallback values where they occur.

use crate::trial::AlgorithmKind;
use thiserror::Error;

/// Invalid run configuration, detected before any measurement starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Nothing to benchmark
    #[error("No algorithms selected")]
    NoAlgorithms,

    /// Iteration count of zero
    #[error("Iteration count must be at least 1")]
    ZeroIterations,

    /// A mode needs a KEM or signature selection that is absent
    #[error("{scenario} needs a {needed} algorithm but none was selected")]
    MissingSelection {
        /// Kind of algorithm that is missing
        needed: AlgorithmKind,
        /// Mode or scenario that requires it
        scenario: String,
    },

    /// Efficiency weights that are negative, non-finite or do not sum to 1
    #[error("Efficiency weights must be non-negative and sum to 1 (time {time}, size {size})")]
    InvalidWeights {
        /// Configured time weight
        time: f64,
        /// Configured size weight
        size: f64,
    },

    /// Outlier threshold that is not a positive finite number
    #[error("Outlier threshold must be a positive number, got {0}")]
    InvalidThreshold(f64),
}

/// Failure signalled by the crypto black box during one trial
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    /// Parameter set not offered by the provider
    #[error("Unsupported parameter set: {0}")]
    Unsupported(String),

    /// Signature or decapsulation check mismatch
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Outcome lacks a required timing
    #[error("Trial did not report a timing for {0}")]
    MissingOperation(String),

    /// Outcome lacks a required size
    #[error("Trial did not report a size for {0}")]
    MissingArtifact(String),

    /// Provider has no trial left to give
    #[error("No recorded trial left for {0}")]
    Exhausted(String),

    /// Any other provider failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A trial failure attributed to one algorithm configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{algorithm} failed on trial {trial}: {source}")]
pub struct TrialFailure {
    /// Algorithm identifier
    pub algorithm: String,
    /// Zero-based index of the failing trial
    pub trial: usize,
    /// Underlying cause
    #[source]
    pub source: TrialError,
}
