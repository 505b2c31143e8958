//! Batch Executor
//!
//! Runs the planned algorithms against the trial runner and turns the
//! collected samples into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExecutionPlan (filtered, sorted)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Sequential trials, one configuration at a time
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Reduce sample sets to AlgorithmResult rows (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Efficiency ranking, scenarios, analysis, summary
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Sequential trial execution with progress reporting
//! - [`statistics`] - Parallel reduction of finished sample sets
//! - [`report`] - Report assembly
//! - [`formatting`] - Human-readable output formatting

mod execution;
mod formatting;
mod report;
mod statistics;

pub use execution::{ExecutionConfig, ExecutionOutcome, Executor};
pub use formatting::format_human_output;
pub use report::{ReportInputs, build_report};
pub use statistics::compute_statistics;
