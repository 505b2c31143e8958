#![warn(missing_docs)]
//! pqbench Core - Measurement Model
//!
//! This crate provides the data model shared by every pqbench component:
//! - `Measurement` and `SampleSet` for raw per-trial values
//! - `AlgorithmResult` rows reduced from sample sets
//! - `TrialRunner`, the capability interface around the opaque crypto provider
//! - `SampleAccumulator`, which drives trials strictly sequentially
//! - `FamilyMarkers`, the explicit classic / post-quantum classifier

mod accumulator;
mod error;
mod family;
mod measurement;
mod result;
mod trial;

pub use accumulator::{
    AccumulatedSamples, BatchOutcome, SampleAccumulator, SampleBatch, accumulate_batch, run_batch,
};
pub use error::{ConfigurationError, TrialError, TrialFailure};
pub use family::{DEFAULT_PQC_MARKERS, Family, FamilyMarkers};
pub use measurement::{Artifact, Measurement, Operation, SampleSet, SampleSetError};
pub use result::{AlgorithmResult, ArtifactSizes, OperationStats};
pub use trial::{AlgorithmKind, AlgorithmSpec, TrialOutcome, TrialRunner};

// Statistics types appear in the public model
pub use pqbench_stats::{OutlierMethod, OutlierReport, StatisticalSummary};
