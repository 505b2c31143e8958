//! Sample Accumulator
//!
//! Drives the trial runner N times for one configuration, strictly one trial
//! after another. The first failure discards everything collected so far for
//! that configuration.

use crate::error::{ConfigurationError, TrialError, TrialFailure};
use crate::measurement::{Artifact, Measurement, Operation, SampleSet};
use crate::result::{AlgorithmResult, ArtifactSizes};
use crate::trial::{AlgorithmSpec, TrialOutcome, TrialRunner};
use pqbench_stats::OutlierMethod;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Raw samples of one configuration, ready for reduction
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedSamples {
    /// Configuration the samples belong to
    pub spec: AlgorithmSpec,
    /// One sample set per timed operation
    pub sample_sets: BTreeMap<Operation, SampleSet>,
    /// Sizes from the first trial
    pub sizes: ArtifactSizes,
    /// Per-trial sum of operation timings
    pub totals: Vec<f64>,
    /// Wall-clock milliseconds spent accumulating
    pub elapsed_ms: f64,
}

/// Sequential trial driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAccumulator {
    iterations: usize,
}

impl SampleAccumulator {
    /// Create an accumulator running `iterations` trials per configuration
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Configured trial count
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run every trial of one configuration
    pub fn accumulate<R>(
        &self,
        runner: &mut R,
        spec: &AlgorithmSpec,
    ) -> Result<AccumulatedSamples, TrialFailure>
    where
        R: TrialRunner + ?Sized,
    {
        let start = Instant::now();
        let mut sample_sets: BTreeMap<Operation, SampleSet> = spec
            .kind
            .operations()
            .into_iter()
            .map(|op| (op, SampleSet::with_capacity(op, self.iterations)))
            .collect();
        let mut sizes = None;
        let mut totals = Vec::with_capacity(self.iterations);

        for trial in 0..self.iterations {
            let outcome = runner
                .run_trial(spec)
                .and_then(|outcome| {
                    outcome.validate(spec.kind)?;
                    Ok(outcome)
                })
                .map_err(|source| {
                    warn!(
                        algorithm = %spec.name,
                        trial,
                        error = %source,
                        "trial failed, discarding configuration"
                    );
                    TrialFailure {
                        algorithm: spec.name.clone(),
                        trial,
                        source,
                    }
                })?;

            let total = record_trial(&mut sample_sets, &outcome).map_err(|source| TrialFailure {
                algorithm: spec.name.clone(),
                trial,
                source,
            })?;
            totals.push(total);

            if sizes.is_none() {
                sizes = Some(sizes_of(&outcome));
            }
        }

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            algorithm = %spec.name,
            trials = totals.len(),
            elapsed_ms,
            "accumulated samples"
        );

        Ok(AccumulatedSamples {
            spec: spec.clone(),
            sample_sets,
            sizes: sizes.unwrap_or_default(),
            totals,
            elapsed_ms,
        })
    }
}

fn record_trial(
    sample_sets: &mut BTreeMap<Operation, SampleSet>,
    outcome: &TrialOutcome,
) -> Result<f64, TrialError> {
    let mut total = 0.0;
    for measurement in outcome.measurements() {
        if let Measurement::Time { operation, millis } = measurement {
            // Extra operations the provider reports are not part of the row
            if let Some(set) = sample_sets.get_mut(&operation) {
                set.record(measurement)
                    .map_err(|e| TrialError::Backend(e.to_string()))?;
                total += millis;
            }
        }
    }
    Ok(total)
}

fn sizes_of(outcome: &TrialOutcome) -> ArtifactSizes {
    let get = |a: Artifact| outcome.sizes.get(&a).copied().unwrap_or(0);
    ArtifactSizes {
        public_key: get(Artifact::PublicKey),
        secret_key: get(Artifact::SecretKey),
        output: get(Artifact::Output),
    }
}

/// Results and isolated failures of one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Completed rows, in execution order
    pub results: Vec<AlgorithmResult>,
    /// Configurations that failed, in execution order
    pub failures: Vec<TrialFailure>,
}

impl BatchOutcome {
    /// Number of configurations attempted
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Raw samples and isolated failures of one batch, before reduction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBatch {
    /// Finished sample sets, in execution order
    pub samples: Vec<AccumulatedSamples>,
    /// Configurations that failed, in execution order
    pub failures: Vec<TrialFailure>,
}

/// Accumulate every configuration in order, isolating failures per configuration
///
/// Rejects an empty batch or a zero iteration count before running any trial.
/// `on_finished` is called once per configuration, after it completed or failed.
pub fn accumulate_batch<R, F>(
    runner: &mut R,
    algorithms: &[AlgorithmSpec],
    accumulator: &SampleAccumulator,
    mut on_finished: F,
) -> Result<SampleBatch, ConfigurationError>
where
    R: TrialRunner + ?Sized,
    F: FnMut(&AlgorithmSpec),
{
    if algorithms.is_empty() {
        return Err(ConfigurationError::NoAlgorithms);
    }
    if accumulator.iterations() == 0 {
        return Err(ConfigurationError::ZeroIterations);
    }

    let mut batch = SampleBatch::default();
    for spec in algorithms {
        match accumulator.accumulate(runner, spec) {
            Ok(samples) => batch.samples.push(samples),
            Err(failure) => batch.failures.push(failure),
        }
        on_finished(spec);
    }

    info!(
        completed = batch.samples.len(),
        failed = batch.failures.len(),
        "batch finished"
    );
    Ok(batch)
}

/// Accumulate and reduce every configuration, isolating failures per row
pub fn run_batch<R>(
    runner: &mut R,
    algorithms: &[AlgorithmSpec],
    accumulator: &SampleAccumulator,
    outlier_method: OutlierMethod,
) -> Result<BatchOutcome, ConfigurationError>
where
    R: TrialRunner + ?Sized,
{
    let SampleBatch { samples, failures } =
        accumulate_batch(runner, algorithms, accumulator, |_| {})?;
    Ok(BatchOutcome {
        results: samples
            .iter()
            .map(|s| AlgorithmResult::from_samples(s, outlier_method))
            .collect(),
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Family;
    use crate::trial::AlgorithmKind;

    fn signature_outcome(scale: f64) -> TrialOutcome {
        TrialOutcome::default()
            .with_time(Operation::KeyGen, 1.0 * scale)
            .with_time(Operation::Sign, 2.0 * scale)
            .with_time(Operation::Verify, 3.0 * scale)
            .with_size(Artifact::PublicKey, 100)
            .with_size(Artifact::SecretKey, 200)
            .with_size(Artifact::Output, 50)
    }

    fn spec(name: &str) -> AlgorithmSpec {
        AlgorithmSpec::new(name, Family::Classic, AlgorithmKind::Signature)
    }

    #[test]
    fn test_accumulate_sequential() {
        let mut trial = 0;
        let mut runner = |_: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            trial += 1;
            Ok(signature_outcome(trial as f64))
        };

        let samples = SampleAccumulator::new(4)
            .accumulate(&mut runner, &spec("RSA-2048"))
            .unwrap();

        assert_eq!(samples.totals, vec![6.0, 12.0, 18.0, 24.0]);
        assert_eq!(samples.sample_sets[&Operation::Sign].values(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(samples.sizes.output, 50);
        assert!(samples.sample_sets.values().all(|s| s.len() == 4));
    }

    #[test]
    fn test_failure_aborts_configuration() {
        let mut trial = 0;
        let mut runner = |_: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            trial += 1;
            if trial == 3 {
                Err(TrialError::VerificationFailed("signature mismatch".to_string()))
            } else {
                Ok(signature_outcome(1.0))
            }
        };

        let failure = SampleAccumulator::new(5)
            .accumulate(&mut runner, &spec("ECDSA"))
            .unwrap_err();

        assert_eq!(failure.algorithm, "ECDSA");
        assert_eq!(failure.trial, 2);
        assert!(matches!(failure.source, TrialError::VerificationFailed(_)));
    }

    #[test]
    fn test_incomplete_outcome_is_failure() {
        let mut runner = |_: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            Ok(TrialOutcome::default().with_time(Operation::KeyGen, 1.0))
        };
        let failure = SampleAccumulator::new(2)
            .accumulate(&mut runner, &spec("RSA-3072"))
            .unwrap_err();
        assert_eq!(failure.trial, 0);
        assert_eq!(failure.source, TrialError::MissingOperation("Sign".to_string()));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut runner = |spec: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            if spec.name == "RSA-15360" {
                Err(TrialError::Unsupported(spec.name.clone()))
            } else {
                Ok(signature_outcome(1.0))
            }
        };
        let algorithms = [spec("RSA-2048"), spec("RSA-15360"), spec("ECDSA")];

        let batch = run_batch(
            &mut runner,
            &algorithms,
            &SampleAccumulator::new(3),
            OutlierMethod::default(),
        )
        .unwrap();

        assert_eq!(batch.attempted(), 3);
        assert_eq!(batch.results.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].algorithm, "RSA-15360");
        assert_eq!(batch.results[1].algorithm, "ECDSA");
    }

    #[test]
    fn test_accumulate_batch_reports_each_configuration() {
        let mut runner = |spec: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> {
            if spec.name == "DSA-1024" {
                Err(TrialError::Unsupported(spec.name.clone()))
            } else {
                Ok(signature_outcome(2.0))
            }
        };
        let algorithms = [spec("RSA-2048"), spec("DSA-1024"), spec("ECDSA")];
        let mut finished = Vec::new();

        let batch = accumulate_batch(
            &mut runner,
            &algorithms,
            &SampleAccumulator::new(2),
            |spec| finished.push(spec.name.clone()),
        )
        .unwrap();

        assert_eq!(finished, vec!["RSA-2048", "DSA-1024", "ECDSA"]);
        assert_eq!(batch.samples.len(), 2);
        assert_eq!(batch.samples[1].totals, vec![12.0, 12.0]);
        assert_eq!(batch.failures[0].algorithm, "DSA-1024");
    }

    #[test]
    fn test_batch_configuration_errors() {
        let mut runner =
            |_: &AlgorithmSpec| -> Result<TrialOutcome, TrialError> { Ok(signature_outcome(1.0)) };

        let err = run_batch(
            &mut runner,
            &[],
            &SampleAccumulator::new(3),
            OutlierMethod::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::NoAlgorithms);

        let err = run_batch(
            &mut runner,
            &[spec("RSA-2048")],
            &SampleAccumulator::new(0),
            OutlierMethod::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroIterations);
    }
}
