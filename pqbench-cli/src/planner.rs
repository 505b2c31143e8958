//! Algorithm Planner
//!
//! Builds the execution plan by filtering and ordering algorithm configurations.
//!
//! Filtering options:
//! - Regex pattern matching on the algorithm name
//! - Family filtering (classic / post-quantum)
//! - Kind filtering (KEM / signature)
//!
//! Ordering: algorithms are sorted alphabetically by name for deterministic execution.

use pqbench_core::{AlgorithmKind, AlgorithmSpec, ConfigurationError, Family};

/// Execution plan for a batch
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlan {
    /// Ordered list of algorithms to run
    pub algorithms: Vec<AlgorithmSpec>,
}

impl ExecutionPlan {
    /// Fail when nothing survived filtering
    pub fn ensure_not_empty(&self) -> Result<(), ConfigurationError> {
        if self.algorithms.is_empty() {
            return Err(ConfigurationError::NoAlgorithms);
        }
        Ok(())
    }

    /// Algorithm names in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.algorithms.iter().map(|a| a.name.as_str())
    }
}

/// Build execution plan from the recorded algorithms
pub fn build_plan(
    algorithms: impl IntoIterator<Item = AlgorithmSpec>,
    filter: Option<&regex::Regex>,
    family: Option<Family>,
    kind: Option<AlgorithmKind>,
) -> ExecutionPlan {
    let mut selected: Vec<_> = algorithms
        .into_iter()
        .filter(|a| filter.is_none_or(|re| re.is_match(&a.name)))
        .filter(|a| family.is_none_or(|f| a.family == f))
        .filter(|a| kind.is_none_or(|k| a.kind == k))
        .collect();

    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected.dedup_by(|a, b| a.name == b.name);

    ExecutionPlan {
        algorithms: selected,
    }
}
