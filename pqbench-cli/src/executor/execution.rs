//! Batch Execution
//!
//! Drives the batch accumulator over every planned configuration, strictly
//! one trial after another. Nothing else runs while trials are in flight, so
//! no timing window overlaps another.
//!
//! A failing configuration is logged and recorded; the batch continues with
//! the next one. Raw samples are kept so reduction can run in parallel.

use indicatif::{ProgressBar, ProgressStyle};
use pqbench_core::{
    AccumulatedSamples, AlgorithmSpec, ConfigurationError, SampleAccumulator, SampleBatch,
    TrialFailure, TrialRunner, accumulate_batch,
};
use std::time::Instant;

/// Configuration for batch execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Trials per configuration
    pub iterations: usize,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            show_progress: true,
        }
    }
}

/// Raw output of a batch, before reduction
#[derive(Debug, Default)]
pub struct ExecutionOutcome {
    /// Finished sample sets in execution order
    pub samples: Vec<AccumulatedSamples>,
    /// Configurations that failed
    pub failures: Vec<TrialFailure>,
    /// Wall-clock time of the whole batch
    pub duration_ms: f64,
}

/// Execute planned configurations sequentially
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    /// Create an executor
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Execute all provided configurations
    ///
    /// Rejects an empty batch or a zero iteration count before running any trial.
    pub fn execute<R>(
        &self,
        runner: &mut R,
        algorithms: &[AlgorithmSpec],
    ) -> Result<ExecutionOutcome, ConfigurationError>
    where
        R: TrialRunner + ?Sized,
    {
        let accumulator = SampleAccumulator::new(self.config.iterations);
        let start = Instant::now();

        let pb = if self.config.show_progress {
            ProgressBar::new(algorithms.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let SampleBatch { samples, failures } =
            accumulate_batch(runner, algorithms, &accumulator, |spec| {
                pb.set_message(spec.name.clone());
                pb.inc(1);
            })?;

        pb.finish_with_message("Complete");
        Ok(ExecutionOutcome {
            samples,
            failures,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
