#![warn(missing_docs)]
//! # pqbench
//!
//! Statistical benchmarking of classical and post-quantum cryptographic primitives.
//!
//! pqbench measures key generation, encapsulation / decapsulation and
//! signing / verification of an opaque crypto provider and turns the samples into:
//! - **Statistics**: mean, median, population standard deviation, percentiles, CV
//! - **Outliers**: IQR fences or z-scores, reported and never removed
//! - **Efficiency**: batch-relative weighted ranking of time and bandwidth
//! - **Scenarios**: TLS 1.3 handshake, secure email, VPN session and code signing
//! - **Analysis**: classic vs post-quantum comparison and use-case recommendations
//! - **Reports**: human-readable, JSON and CSV
//!
//! ## Quick Start
//!
//! ```ignore
//! use pqbench::prelude::*;
//!
//! let mut runner = |spec: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
//!     provider.run_once(spec)
//! };
//! let specs = vec![AlgorithmSpec::new(
//!     "ML-KEM-768",
//!     Family::PostQuantum,
//!     AlgorithmKind::Kem,
//! )];
//! let batch = run_batch(
//!     &mut runner,
//!     &specs,
//!     &SampleAccumulator::new(100),
//!     OutlierMethod::default(),
//! )?;
//! let ranking = rank_efficiency(&batch.results, EfficiencyWeights::default());
//! ```

// Re-export core types
pub use pqbench_core::{
    AccumulatedSamples, AlgorithmKind, AlgorithmResult, AlgorithmSpec, Artifact, ArtifactSizes,
    BatchOutcome, ConfigurationError, Family, FamilyMarkers, Measurement, Operation,
    OperationStats, SampleAccumulator, SampleBatch, SampleSet, TrialError, TrialFailure,
    TrialOutcome, TrialRunner, accumulate_batch, run_batch,
};

// Re-export stats
pub use pqbench_stats::{
    EfficiencyWeights, OutlierMethod, OutlierReport, StatisticalSummary, compute_summary,
    consistency_score, detect_outliers,
};

// Re-export scenarios
pub use pqbench_scenarios::{
    KemRun, ScenarioBackend, ScenarioComposer, ScenarioError, ScenarioKind, ScenarioParams,
    ScenarioRequest, ScenarioResult, SignatureRun, tls_handshake,
};

// Re-export analysis
pub use pqbench_analysis::{
    AnalysisOutcome, CategoryTable, UseCase, analyze_family, compare_families,
    generate_recommendations, rank_efficiency,
};

// Re-export reporting
pub use pqbench_report::{OutputFormat, Report, generate_csv_report, generate_json_report};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AlgorithmKind, AlgorithmSpec, EfficiencyWeights, Family, OutlierMethod,
        SampleAccumulator, TrialError, TrialOutcome, TrialRunner, rank_efficiency, run_batch,
    };
}

/// Run the pqbench CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     pqbench::run()
/// }
/// ```
pub use pqbench_cli::run;
