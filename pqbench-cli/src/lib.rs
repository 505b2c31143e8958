#![warn(missing_docs)]
//! pqbench CLI Library
//!
//! This module provides the command-line pipeline behind the `pqbench` binary.
//! The crypto provider is driven by an external harness that records every
//! trial into a JSON trial log; pqbench replays that log strictly in order,
//! reduces it, composes scenarios and writes a human, JSON or CSV report.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     pqbench_cli::run()
//! }
//! ```

mod config;
mod executor;
mod planner;
mod replay;

pub use config::*;
pub use executor::{
    ExecutionConfig, ExecutionOutcome, Executor, ReportInputs, build_report, compute_statistics,
    format_human_output,
};
pub use planner::{ExecutionPlan, build_plan};
pub use replay::{RecordedAlgorithm, RecordedTrial, ReplayBackend, SymmetricCalibration, TrialLog};

use anyhow::Context;
use clap::{Parser, Subcommand};
use pqbench_analysis::{CategoryTable, UseCase};
use pqbench_core::{AlgorithmKind, Family, FamilyMarkers};
use pqbench_report::{OutputFormat, ReportConfig, generate_csv_report, generate_json_report};
use pqbench_scenarios::{ScenarioComposer, ScenarioKind, ScenarioRequest};
use rayon::ThreadPoolBuilder;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// pqbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "pqbench")]
#[command(
    author,
    version,
    about = "pqbench - statistical benchmarking of classical and post-quantum primitives"
)]
pub struct Cli {
    /// Optional subcommand (Run, List, Scenarios, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter algorithms by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Recorded trial log (JSON); defaults to runner.input from pqbench.toml
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Configuration file; discovered from the current directory if omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Trials per algorithm; defaults to the smallest recorded trial count
    #[arg(long, short = 'n')]
    pub iterations: Option<usize>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run only this family: classic or pqc
    #[arg(long)]
    pub family: Option<String>,

    /// Run only this kind: kem or signature
    #[arg(long)]
    pub kind: Option<String>,

    /// Recommendation profile: general, iot, server, mobile, high_security
    #[arg(long)]
    pub use_case: Option<String>,

    /// Compose this scenario after the batch (repeatable)
    #[arg(long = "scenario")]
    pub scenarios: Vec<String>,

    /// KEM used by the scenarios
    #[arg(long)]
    pub kem: Option<String>,

    /// Signature algorithm used by the scenarios
    #[arg(long)]
    pub signature: Option<String>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Number of threads for parallel statistics computation
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmark batch (default)
    Run,
    /// List the algorithms the plan would run
    List,
    /// List the supported scenarios
    Scenarios,
    /// Print a documented default pqbench.toml
    Init,
}

/// Run the pqbench CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the pqbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Logs go to stderr so report output on stdout stays machine-readable
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("pqbench=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("pqbench=info")
            .with_writer(std::io::stderr)
            .init();
    }

    // CLI flags override file values
    let config = match &cli.config {
        Some(path) => PqbenchConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => PqbenchConfig::discover().unwrap_or_default(),
    };

    match cli.command {
        Some(Commands::Init) => {
            print!("{}", PqbenchConfig::default_toml());
        }
        Some(Commands::Scenarios) => {
            list_scenarios();
        }
        Some(Commands::List) => {
            list_algorithms(&cli, &config)?;
        }
        Some(Commands::Run) | None => {
            run_benchmarks(&cli, &config)?;
        }
    }

    Ok(())
}

fn parse_family(s: &str) -> anyhow::Result<Family> {
    match s.to_lowercase().as_str() {
        "classic" => Ok(Family::Classic),
        "pqc" | "post-quantum" | "postquantum" => Ok(Family::PostQuantum),
        other => anyhow::bail!("Unknown family: {} (expected classic or pqc)", other),
    }
}

fn parse_kind(s: &str) -> anyhow::Result<AlgorithmKind> {
    match s.to_lowercase().as_str() {
        "kem" => Ok(AlgorithmKind::Kem),
        "signature" | "sig" => Ok(AlgorithmKind::Signature),
        other => anyhow::bail!("Unknown kind: {} (expected kem or signature)", other),
    }
}

fn load_log(cli: &Cli, config: &PqbenchConfig) -> anyhow::Result<TrialLog> {
    let input = cli
        .input
        .clone()
        .or_else(|| config.runner.input.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow::anyhow!("No trial log given; pass --input or set runner.input in pqbench.toml")
        })?;
    TrialLog::load(&input)
}

/// Filter the recorded algorithms using the planner module.
///
/// Returns algorithms sorted alphabetically by name for deterministic execution.
fn plan_algorithms(
    cli: &Cli,
    log: &TrialLog,
    markers: &FamilyMarkers,
) -> anyhow::Result<ExecutionPlan> {
    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("Invalid filter pattern: {}", cli.filter))?;
    let family = cli.family.as_deref().map(parse_family).transpose()?;
    let kind = cli.kind.as_deref().map(parse_kind).transpose()?;

    Ok(build_plan(log.specs(markers), Some(&filter), family, kind))
}

fn list_algorithms(cli: &Cli, config: &PqbenchConfig) -> anyhow::Result<()> {
    println!("pqbench Plan:");

    let log = load_log(cli, config)?;
    let plan = plan_algorithms(cli, &log, &config.analysis.markers())?;

    let mut groups: std::collections::BTreeMap<AlgorithmKind, Vec<_>> =
        std::collections::BTreeMap::new();
    for spec in &plan.algorithms {
        groups.entry(spec.kind).or_default().push(spec);
    }

    for (kind, specs) in &groups {
        println!("├── kind: {}", kind);
        for spec in specs {
            let trials = log.min_trials([spec.name.as_str()]).unwrap_or(0);
            println!("│   ├── {} [{}] ({} trials)", spec.name, spec.family, trials);
        }
    }

    println!("{} algorithms found.", plan.algorithms.len());
    Ok(())
}

fn list_scenarios() {
    println!("Available scenarios:");
    for kind in ScenarioKind::ALL {
        let needs = if kind.needs_kem() {
            "KEM + signature"
        } else {
            "signature"
        };
        println!("  {:<14} {} ({})", kind.slug(), kind.label(), needs);
    }
}

/// Resolve the scenario selection before any trial runs
fn scenario_requests(cli: &Cli, config: &PqbenchConfig) -> anyhow::Result<Vec<ScenarioRequest>> {
    let names = if cli.scenarios.is_empty() {
        &config.scenarios.enabled
    } else {
        &cli.scenarios
    };
    let kem = cli.kem.as_deref().or(config.scenarios.kem.as_deref());
    let signature = cli
        .signature
        .as_deref()
        .or(config.scenarios.signature.as_deref());
    let params = config.scenarios.params();

    names
        .iter()
        .map(|name| -> anyhow::Result<ScenarioRequest> {
            let kind: ScenarioKind = name.parse().map_err(anyhow::Error::msg)?;
            Ok(ScenarioRequest::from_selection(kind, kem, signature, &params)?)
        })
        .collect()
}

/// Report destination: `--output`, else the configured directory for machine formats
///
/// `None` means stdout.
fn report_path(cli: &Cli, config: &PqbenchConfig, format: OutputFormat) -> Option<PathBuf> {
    if let Some(path) = &cli.output {
        return Some(path.clone());
    }
    let file_name = match format {
        OutputFormat::Human => return None,
        OutputFormat::Json => "report.json",
        OutputFormat::Csv => "report.csv",
    };
    if config.output.directory.is_empty() {
        return None;
    }
    Some(Path::new(&config.output.directory).join(file_name))
}

fn run_benchmarks(cli: &Cli, config: &PqbenchConfig) -> anyhow::Result<()> {
    config.validate()?;

    // Configure Rayon thread pool for statistics computation
    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    let use_case: UseCase = cli
        .use_case
        .as_deref()
        .unwrap_or(&config.analysis.use_case)
        .parse()
        .map_err(anyhow::Error::msg)?;

    let log = load_log(cli, config)?;
    let markers = config.analysis.markers();
    let plan = plan_algorithms(cli, &log, &markers)?;
    plan.ensure_not_empty()?;

    // Selection errors surface before any measurement
    let requests = scenario_requests(cli, config)?;

    let iterations = cli
        .iterations
        .or(config.runner.iterations)
        .or_else(|| log.min_trials(plan.names()))
        .unwrap_or(0);
    info!(
        algorithms = plan.algorithms.len(),
        iterations,
        scenarios = requests.len(),
        "starting batch"
    );

    let mut backend = ReplayBackend::new(log);
    let executor = Executor::new(ExecutionConfig {
        iterations,
        show_progress: !cli.no_progress,
    });
    let outcome = executor.execute(&mut backend, &plan.algorithms)?;

    let outlier_method = config.statistics.method();
    let results = compute_statistics(&outcome.samples, outlier_method);

    let (scenarios, scenario_errors) =
        ScenarioComposer::new(&mut backend, markers).run_all(&requests);

    let categories = CategoryTable::default();
    let report = build_report(ReportInputs {
        results,
        failures: &outcome.failures,
        scenarios,
        scenario_errors: &scenario_errors,
        config: ReportConfig {
            iterations,
            outlier_method,
            efficiency_weights: config.efficiency.weights(),
            use_case,
        },
        categories: &categories,
        total_duration_ms: outcome.duration_ms,
    });

    // Generate output
    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    // Write output
    if let Some(path) = report_path(cli, config, format) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}
